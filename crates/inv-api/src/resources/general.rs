//! Geography and catalog resources

use async_trait::async_trait;
use inv_core::{Id, Identifiable};
use inv_db::{params, DbResult};
use inv_models::{City, Country, Department, MeasurementUnit, MovementType};
use inv_services::{Service, Services};
use std::sync::Arc;

use crate::resource::{lookup, Resource, Write};

#[async_trait]
impl Resource for Country {
    type Key = Id;

    const PATH: &'static str = "paises";
    const PLURAL: &'static str = "countries";
    const SELECT_ALL: &'static str = "SELECT * FROM paises ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM paises WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO paises (id, nombre, codigo_iso2, codigo_iso3) \
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('paises', 'id')::regclass)::integer), $2, $3, $4)",
            params![
                self.assigned_id(),
                &self.nombre,
                &self.codigo_iso2,
                &self.codigo_iso3
            ],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE paises SET nombre = $2, codigo_iso2 = $3, codigo_iso3 = $4 WHERE id = $1",
            params![self.id, &self.nombre, &self.codigo_iso2, &self.codigo_iso3],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM paises WHERE id = $1", params![self.id])
    }
}

#[async_trait]
impl Resource for Department {
    type Key = Id;

    const PATH: &'static str = "departamentos";
    const PLURAL: &'static str = "departments";
    const SELECT_ALL: &'static str = "SELECT * FROM departamentos ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM departamentos WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO departamentos (id, nombre, pais_id) \
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('departamentos', 'id')::regclass)::integer), $2, $3)",
            params![self.assigned_id(), &self.nombre, self.pais_id],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE departamentos SET nombre = $2, pais_id = $3 WHERE id = $1",
            params![self.id, &self.nombre, self.pais_id],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM departamentos WHERE id = $1", params![self.id])
    }

    async fn hydrate(services: &Services, rows: &mut [Self]) -> DbResult<()> {
        for row in rows.iter_mut() {
            row.pais = lookup(&services.countries, row.pais_id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Resource for City {
    type Key = Id;

    const PATH: &'static str = "ciudades";
    const PLURAL: &'static str = "cities";
    const SELECT_ALL: &'static str = "SELECT * FROM ciudades ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM ciudades WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO ciudades (id, nombre, departamento_id, pais_id, codigo) \
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('ciudades', 'id')::regclass)::integer), $2, $3, $4, $5)",
            params![
                self.assigned_id(),
                &self.nombre,
                self.departamento_id,
                self.pais_id,
                &self.codigo
            ],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE ciudades SET nombre = $2, departamento_id = $3, pais_id = $4, codigo = $5 \
             WHERE id = $1",
            params![
                self.id,
                &self.nombre,
                self.departamento_id,
                self.pais_id,
                &self.codigo
            ],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM ciudades WHERE id = $1", params![self.id])
    }

    async fn hydrate(services: &Services, rows: &mut [Self]) -> DbResult<()> {
        for row in rows.iter_mut() {
            row.departamento = lookup(&services.departments, row.departamento_id).await?;
            row.pais = lookup(&services.countries, row.pais_id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Resource for MeasurementUnit {
    type Key = Id;

    const PATH: &'static str = "unidadesmedida";
    const PLURAL: &'static str = "measurement units";
    const SELECT_ALL: &'static str = "SELECT * FROM unidades_medida ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM unidades_medida WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO unidades_medida (id, nombre, abreviatura) \
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('unidades_medida', 'id')::regclass)::integer), $2, $3)",
            params![self.assigned_id(), &self.nombre, &self.abreviatura],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE unidades_medida SET nombre = $2, abreviatura = $3 WHERE id = $1",
            params![self.id, &self.nombre, &self.abreviatura],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM unidades_medida WHERE id = $1", params![self.id])
    }
}

/// Keyed by `codigo`; the surrogate id is assigned by the database
#[async_trait]
impl Resource for MovementType {
    type Key = String;

    const PATH: &'static str = "tiposmovimiento";
    const PLURAL: &'static str = "movement types";
    const SELECT_ALL: &'static str = "SELECT * FROM tipos_movimiento ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM tipos_movimiento WHERE codigo = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> String {
        self.codigo.clone()
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO tipos_movimiento (codigo, nombre, descripcion) VALUES ($1, $2, $3)",
            params![&self.codigo, &self.nombre, &self.descripcion],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE tipos_movimiento SET nombre = $2, descripcion = $3 WHERE codigo = $1",
            params![&self.codigo, &self.nombre, &self.descripcion],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM tipos_movimiento WHERE codigo = $1", params![&self.codigo])
    }
}
