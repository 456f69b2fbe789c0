//! Inventory resources

use async_trait::async_trait;
use inv_core::{Id, Identifiable};
use inv_db::{params, DbResult};
use inv_models::{Article, Category, Status};
use inv_services::{Service, Services};
use std::sync::Arc;

use crate::resource::{lookup, Resource, Write};

#[async_trait]
impl Resource for Category {
    type Key = Id;

    const PATH: &'static str = "categorias";
    const PLURAL: &'static str = "categories";
    const SELECT_ALL: &'static str = "SELECT * FROM categorias ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM categorias WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO categorias (id, nombre, descripcion) \
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('categorias', 'id')::regclass)::integer), $2, $3)",
            params![self.assigned_id(), &self.nombre, &self.descripcion],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE categorias SET nombre = $2, descripcion = $3 WHERE id = $1",
            params![self.id, &self.nombre, &self.descripcion],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM categorias WHERE id = $1", params![self.id])
    }
}

#[async_trait]
impl Resource for Status {
    type Key = Id;

    const PATH: &'static str = "estados";
    const PLURAL: &'static str = "statuses";
    const SELECT_ALL: &'static str = "SELECT * FROM estados ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM estados WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO estados (id, nombre, descripcion) \
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('estados', 'id')::regclass)::integer), $2, $3)",
            params![self.assigned_id(), &self.nombre, &self.descripcion],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE estados SET nombre = $2, descripcion = $3 WHERE id = $1",
            params![self.id, &self.nombre, &self.descripcion],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM estados WHERE id = $1", params![self.id])
    }
}

/// Keyed by `codigo`; all writes go through the `sp_articulos_*` procedures
#[async_trait]
impl Resource for Article {
    type Key = String;

    const PATH: &'static str = "articulos";
    const PLURAL: &'static str = "articles";
    const SELECT_ALL: &'static str = "SELECT * FROM sp_articulos_select()";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM articulos WHERE codigo = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> String {
        self.codigo.clone()
    }

    fn insert(&self) -> Write {
        Write::procedure(
            "sp_articulos_insert",
            params![
                self.assigned_id(),
                &self.codigo,
                &self.nombre,
                &self.descripcion,
                self.precio_compra,
                self.precio_venta,
                self.stock,
                self.categoria_id,
                self.unidad_medida_id,
                self.estado_id
            ],
        )
    }

    fn update(&self) -> Write {
        Write::procedure(
            "sp_articulos_update",
            params![
                &self.codigo,
                &self.nombre,
                &self.descripcion,
                self.precio_compra,
                self.precio_venta,
                self.stock,
                self.categoria_id,
                self.unidad_medida_id,
                self.estado_id
            ],
        )
    }

    fn delete(&self) -> Write {
        Write::procedure("sp_articulos_delete", params![&self.codigo])
    }

    async fn hydrate(services: &Services, rows: &mut [Self]) -> DbResult<()> {
        for row in rows.iter_mut() {
            row.categoria = lookup(&services.categories, row.categoria_id).await?;
        }
        Ok(())
    }
}
