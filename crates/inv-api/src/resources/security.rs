//! People, roles and users

use async_trait::async_trait;
use inv_core::{Id, Identifiable, ValidationErrors};
use inv_db::{params, DbResult};
use inv_models::{Person, Role, User};
use inv_services::{Service, Services};
use std::sync::Arc;

use crate::resource::{lookup, Resource, Write};

/// Keyed by national identification number
#[async_trait]
impl Resource for Person {
    type Key = String;

    const PATH: &'static str = "personas";
    const PLURAL: &'static str = "people";
    const SELECT_ALL: &'static str = "SELECT * FROM sp_personas_select()";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM personas WHERE identificacion = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> String {
        self.identificacion.clone()
    }

    fn insert(&self) -> Write {
        Write::procedure(
            "sp_personas_insert",
            params![
                self.assigned_id(),
                &self.identificacion,
                &self.primer_nombre,
                &self.segundo_nombre,
                &self.primer_apellido,
                &self.segundo_apellido,
                &self.telefono,
                &self.direccion,
                &self.correo
            ],
        )
    }

    fn update(&self) -> Write {
        Write::procedure(
            "sp_personas_update",
            params![
                &self.identificacion,
                &self.primer_nombre,
                &self.segundo_nombre,
                &self.primer_apellido,
                &self.segundo_apellido,
                &self.telefono,
                &self.direccion,
                &self.correo
            ],
        )
    }

    fn delete(&self) -> Write {
        Write::procedure("sp_personas_delete", params![&self.identificacion])
    }
}

#[async_trait]
impl Resource for Role {
    type Key = Id;

    const PATH: &'static str = "roles";
    const PLURAL: &'static str = "roles";
    const SELECT_ALL: &'static str = "SELECT * FROM roles ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM roles WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::procedure(
            "sp_roles_insertar",
            params![self.assigned_id(), &self.nombre, &self.descripcion],
        )
    }

    fn update(&self) -> Write {
        Write::procedure(
            "sp_roles_actualizar",
            params![self.id, &self.nombre, &self.descripcion],
        )
    }

    fn delete(&self) -> Write {
        Write::procedure("sp_roles_eliminar", params![self.id])
    }
}

#[async_trait]
impl Resource for User {
    type Key = Id;

    const PATH: &'static str = "usuarios";
    const PLURAL: &'static str = "users";
    const SELECT_ALL: &'static str = "SELECT * FROM usuarios ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM usuarios WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::procedure(
            "sp_usuarios_insertar",
            params![
                self.assigned_id(),
                &self.username,
                &self.password,
                self.rol_id,
                self.persona_id
            ],
        )
    }

    fn update(&self) -> Write {
        Write::procedure(
            "sp_usuarios_actualizar",
            params![
                self.id,
                &self.username,
                self.password_change(),
                self.rol_id,
                self.persona_id
            ],
        )
    }

    fn delete(&self) -> Write {
        Write::procedure("sp_usuarios_eliminar", params![self.id])
    }

    fn check_new(&self) -> Result<(), ValidationErrors> {
        if self.password_change().is_some() {
            return Ok(());
        }
        let mut errors = ValidationErrors::new();
        errors.add("password", "can't be blank");
        Err(errors)
    }

    async fn hydrate(services: &Services, rows: &mut [Self]) -> DbResult<()> {
        for row in rows.iter_mut() {
            row.rol = lookup(&services.roles, row.rol_id).await?;
            row.persona = services
                .people
                .call_procedure("sp_personas_select_id", params![row.persona_id])
                .await?
                .into_iter()
                .next();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app, int, next_id, send, services, text, TableFake};
    use axum::http::{Method, StatusCode};
    use inv_db::SqlParam;
    use serde_json::json;

    fn ana() -> Person {
        Person {
            id: 4,
            identificacion: "1020304050".into(),
            primer_nombre: "Ana".into(),
            primer_apellido: "Gómez".into(),
            correo: "ana@example.com".into(),
            ..Default::default()
        }
    }

    fn people(rows: Vec<Person>) -> Arc<TableFake<Person>> {
        TableFake::new(rows)
            .column("id", |p: &Person| p.id.into())
            .column("identificacion", |p: &Person| (&p.identificacion).into())
            .shared()
    }

    fn security() -> Services {
        let mut services = services();
        services.people = people(vec![ana()]);
        services.roles = TableFake::new(vec![Role {
            id: 2,
            nombre: "Vendedor".into(),
            descripcion: String::new(),
        }])
        .column("id", |r: &Role| r.id.into())
        .shared();
        services.users = TableFake::new(vec![User {
            id: 1,
            username: "ana".into(),
            password: "s3cret".into(),
            rol_id: 2,
            persona_id: 4,
            ..Default::default()
        }])
        .column("id", |u: &User| u.id.into())
        .shared();
        services
    }

    #[tokio::test]
    async fn test_user_resolves_role_and_person_without_password() {
        let (status, body) = send(app(security()), Method::GET, "/api/usuarios/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "ana");
        assert!(body.get("password").is_none());
        assert_eq!(body["rol"]["nombre"], "Vendedor");
        assert_eq!(body["persona"]["identificacion"], "1020304050");
    }

    /// NULL password on update keeps the stored one
    fn users() -> Arc<TableFake<User>> {
        TableFake::new(vec![])
            .column("id", |u: &User| u.id.into())
            .on_write(|name, params, rows| match name {
                "sp_usuarios_insertar" => {
                    let user = User {
                        id: next_id(rows, |u| u.id),
                        username: text(params, 1),
                        password: text(params, 2),
                        rol_id: int(params, 3),
                        persona_id: int(params, 4),
                        ..Default::default()
                    };
                    rows.push(user.clone());
                    vec![user]
                }
                "sp_usuarios_actualizar" => {
                    let id = int(params, 0);
                    rows.iter_mut()
                        .filter(|u| u.id == id)
                        .map(|u| {
                            u.username = text(params, 1);
                            if let Some(password) = params.get(2).and_then(SqlParam::as_str) {
                                u.password = password.to_string();
                            }
                            u.rol_id = int(params, 3);
                            u.persona_id = int(params, 4);
                            u.clone()
                        })
                        .collect()
                }
                other => panic!("unexpected write {other}"),
            })
            .shared()
    }

    #[tokio::test]
    async fn test_user_read_back_and_saved_keeps_password() {
        let table = users();
        let mut services = security();
        services.users = table.clone();
        let app = app(services);

        let ana = json!({ "username": "ana", "password": "s3cret", "rolId": 2, "personaId": 4 });
        let (status, _) = send(app.clone(), Method::POST, "/api/usuarios", Some(ana)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, mut user) = send(app.clone(), Method::GET, "/api/usuarios/1", None).await;
        assert_eq!(status, StatusCode::OK);
        user["username"] = json!("ana.gomez");

        let (status, list) = send(app, Method::PUT, "/api/usuarios", Some(user)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["username"], "ana.gomez");

        let stored = &table.rows()[0];
        assert_eq!(stored.username, "ana.gomez");
        assert_eq!(stored.password, "s3cret");
    }

    #[tokio::test]
    async fn test_new_user_needs_a_password() {
        let table = users();
        let mut services = security();
        services.users = table.clone();

        let body = json!({ "username": "ana", "password": " ", "rolId": 2, "personaId": 4 });
        let (status, body) = send(app(services), Method::POST, "/api/usuarios", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "password can't be blank");
        assert!(table.rows().is_empty());
    }

    #[tokio::test]
    async fn test_people_are_looked_up_by_identification() {
        let app = app(security());

        let (status, body) = send(app.clone(), Method::GET, "/api/personas/1020304050", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["primerNombre"], "Ana");

        let (status, _) = send(app, Method::GET, "/api/personas/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_person_with_malformed_email_is_rejected() {
        let mut person = serde_json::to_value(ana()).unwrap();
        person["identificacion"] = json!("77");
        person["correo"] = json!("not-an-email");

        let (status, body) = send(app(security()), Method::POST, "/api/personas", Some(person)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "correo is not a valid email");
    }

    #[tokio::test]
    async fn test_role_writes_use_procedures() {
        let roles = TableFake::new(vec![])
            .column("id", |r: &Role| r.id.into())
            .on_write(|name, params, rows| {
                assert_eq!(name, "sp_roles_insertar");
                assert!(params.get(0).map_or(false, |p| p.is_null()));
                let role = Role {
                    id: 10,
                    nombre: text(params, 1),
                    descripcion: text(params, 2),
                };
                rows.push(role.clone());
                vec![role]
            })
            .shared();
        let mut services = services();
        services.roles = roles.clone();

        let body = json!({ "nombre": "Bodega", "descripcion": "Manejo de inventario" });
        let (status, list) = send(app(services), Method::POST, "/api/roles", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["id"], 10);
        assert_eq!(roles.rows()[0].nombre, "Bodega");
    }

    #[test]
    fn test_user_update_without_password_binds_null() {
        let user = User {
            id: 1,
            username: "ana".into(),
            rol_id: 2,
            persona_id: 4,
            ..Default::default()
        };

        let Write::Procedure { params, .. } = user.update() else {
            panic!("users are written through procedures");
        };
        assert_eq!(params.get(2), Some(&SqlParam::Text(None)));
    }

    #[test]
    fn test_user_update_sends_password() {
        let user = User {
            id: 1,
            username: "ana".into(),
            password: "nueva".into(),
            rol_id: 2,
            persona_id: 4,
            ..Default::default()
        };

        let Write::Procedure { name, params } = user.update() else {
            panic!("users are written through procedures");
        };
        assert_eq!(name, "sp_usuarios_actualizar");
        assert_eq!(int(&params, 0), 1);
        assert_eq!(text(&params, 2), "nueva");
    }
}
