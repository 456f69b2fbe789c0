//! Billing resources

use async_trait::async_trait;
use inv_core::{Id, Identifiable};
use inv_db::{params, DbError, DbResult};
use inv_models::{BillingRecord, Consecutive, Payment};
use inv_services::{Service, Services};
use std::sync::Arc;

use crate::resource::{lookup, sync_identity, Resource, Write};

const INSERT_LINE: &str =
    "INSERT INTO registros_detalles (registro_id, articulo_id, cantidad) VALUES ($1, $2, $3)";
const LINES_OF_RECORD: &str = "SELECT * FROM registros_detalles WHERE registro_id = $1 ORDER BY id";
const PAYMENT_OF_RECORD: &str = "SELECT * FROM pagos WHERE registro_id = $1 ORDER BY id";

#[async_trait]
impl Resource for Payment {
    type Key = Id;

    const PATH: &'static str = "pagos";
    const PLURAL: &'static str = "payments";
    const SELECT_ALL: &'static str = "SELECT * FROM pagos ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM pagos WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::procedure(
            "sp_pagos_insertar",
            params![
                self.assigned_id(),
                self.fecha,
                self.monto,
                self.registro_id,
                &self.medio_pago_id
            ],
        )
    }

    fn update(&self) -> Write {
        Write::procedure(
            "sp_pagos_actualizar",
            params![
                self.id,
                self.fecha,
                self.monto,
                self.registro_id,
                &self.medio_pago_id
            ],
        )
    }

    fn delete(&self) -> Write {
        Write::procedure("sp_pagos_eliminar", params![self.id])
    }
}

/// Header through `sp_registros_*`, detail lines through plain SQL.
/// Deleting a header removes its lines by cascade.
#[async_trait]
impl Resource for BillingRecord {
    type Key = Id;

    const PATH: &'static str = "registros";
    const PLURAL: &'static str = "billing records";
    const SELECT_ALL: &'static str = "SELECT * FROM registros ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM registros WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::procedure(
            "sp_registros_insertar",
            params![
                self.assigned_id(),
                self.fecha,
                self.responsable_id,
                self.cliente_id,
                &self.tipo_registro,
                self.total,
                &self.comentario
            ],
        )
    }

    fn update(&self) -> Write {
        Write::procedure(
            "sp_registros_actualizar",
            params![
                self.id,
                self.fecha,
                self.responsable_id,
                self.cliente_id,
                &self.tipo_registro,
                self.total,
                &self.comentario
            ],
        )
    }

    fn delete(&self) -> Write {
        Write::procedure("sp_registros_eliminar", params![self.id])
    }

    /// Not atomic: a failing line leaves the header and the earlier lines stored.
    async fn create(&self, services: &Services) -> DbResult<()> {
        let header = self
            .insert()
            .run(&services.billing_records)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound("sp_registros_insertar returned no row".to_string()))?;
        if self.assigned_id().is_some() {
            sync_identity(&services.billing_records).await?;
        }

        for line in &self.detalles {
            services
                .billing_lines
                .execute(INSERT_LINE, params![header.id, line.articulo_id, line.cantidad])
                .await?;
        }

        tracing::debug!(registro = header.id, lines = self.detalles.len(), "billing record stored");
        Ok(())
    }

    async fn hydrate(services: &Services, rows: &mut [Self]) -> DbResult<()> {
        for row in rows.iter_mut() {
            row.responsable = lookup(&services.people, row.responsable_id).await?;
            row.cliente = lookup(&services.people, row.cliente_id).await?;

            let mut lines = services
                .billing_lines
                .query(LINES_OF_RECORD, params![row.id])
                .await?;
            for line in lines.iter_mut() {
                line.articulo = lookup(&services.articles, line.articulo_id).await?;
            }
            row.detalles = lines;

            row.pago = services
                .payments
                .query(PAYMENT_OF_RECORD, params![row.id])
                .await?
                .into_iter()
                .next();
        }
        Ok(())
    }
}

#[async_trait]
impl Resource for Consecutive {
    type Key = Id;

    const PATH: &'static str = "consecutivos";
    const PLURAL: &'static str = "consecutives";
    const SELECT_ALL: &'static str = "SELECT * FROM consecutivos ORDER BY id";
    const SELECT_BY_KEY: &'static str = "SELECT * FROM consecutivos WHERE id = $1";

    fn service(services: &Services) -> &Arc<dyn Service<Self>> {
        services.get::<Self>()
    }

    fn key(&self) -> Id {
        self.id
    }

    fn insert(&self) -> Write {
        Write::sql(
            "INSERT INTO consecutivos (id, consecutivo, tipo_movimiento_id, descripcion) \
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('consecutivos', 'id')::regclass)::integer), $2, $3, $4)",
            params![
                self.assigned_id(),
                self.consecutivo,
                self.tipo_movimiento_id,
                &self.descripcion
            ],
        )
    }

    fn update(&self) -> Write {
        Write::sql(
            "UPDATE consecutivos SET consecutivo = $2, tipo_movimiento_id = $3, descripcion = $4 \
             WHERE id = $1",
            params![
                self.id,
                self.consecutivo,
                self.tipo_movimiento_id,
                &self.descripcion
            ],
        )
    }

    fn delete(&self) -> Write {
        Write::sql("DELETE FROM consecutivos WHERE id = $1", params![self.id])
    }

    async fn hydrate(services: &Services, rows: &mut [Self]) -> DbResult<()> {
        for row in rows.iter_mut() {
            row.tipo_movimiento = lookup(&services.movement_types, row.tipo_movimiento_id).await?;
        }
        Ok(())
    }
}
