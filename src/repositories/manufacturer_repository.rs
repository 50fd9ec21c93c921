use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::Manufacturer;
use crate::utils::errors::AppResult;

/// Fabricantes que vienen precargados (mismos códigos que la migración inicial)
pub const DEFAULT_MANUFACTURERS: [(i32, &str); 5] = [
    (100, "Audi"),
    (101, "Chevrolet"),
    (102, "Ford"),
    (103, "BMW"),
    (104, "Dodge"),
];

#[async_trait]
pub trait ManufacturerStore: Send + Sync {
    async fn find_by_code(&self, code: i32) -> AppResult<Option<Manufacturer>>;

    /// Búsqueda sin distinguir mayúsculas
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Manufacturer>>;

    /// Guarda el fabricante y asigna código si no lo tiene
    async fn save(&self, manufacturer: Manufacturer) -> AppResult<Manufacturer>;
}

pub struct PgManufacturerRepository {
    pool: PgPool,
}

impl PgManufacturerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManufacturerStore for PgManufacturerRepository {
    async fn find_by_code(&self, code: i32) -> AppResult<Option<Manufacturer>> {
        let manufacturer =
            sqlx::query_as::<_, Manufacturer>("SELECT code, name FROM manufacturers WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;

        Ok(manufacturer)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Manufacturer>> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "SELECT code, name FROM manufacturers WHERE LOWER(name) = LOWER($1) ORDER BY code LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manufacturer)
    }

    async fn save(&self, manufacturer: Manufacturer) -> AppResult<Manufacturer> {
        let saved = match manufacturer.code {
            Some(code) => {
                sqlx::query_as::<_, Manufacturer>(
                    r#"
                    INSERT INTO manufacturers (code, name)
                    VALUES ($1, $2)
                    ON CONFLICT (code) DO UPDATE SET name = EXCLUDED.name
                    RETURNING code, name
                    "#,
                )
                .bind(code)
                .bind(&manufacturer.name)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Manufacturer>(
                    "INSERT INTO manufacturers (name) VALUES ($1) RETURNING code, name",
                )
                .bind(&manufacturer.name)
                .fetch_one(&self.pool)
                .await?
            }
        };

        log::info!("🏭 Fabricante guardado: {} ({:?})", saved.name, saved.code);
        Ok(saved)
    }
}

struct InMemoryManufacturers {
    manufacturers: BTreeMap<i32, Manufacturer>,
    next_code: i32,
}

pub struct InMemoryManufacturerRepository {
    inner: RwLock<InMemoryManufacturers>,
}

impl InMemoryManufacturerRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(InMemoryManufacturers {
                manufacturers: BTreeMap::new(),
                next_code: 1,
            }),
        }
    }

    /// Repositorio con los fabricantes por defecto; los códigos nuevos empiezan en 105
    pub fn with_defaults() -> Self {
        let manufacturers = DEFAULT_MANUFACTURERS
            .iter()
            .map(|(code, name)| (*code, Manufacturer::with_code(*code, *name)))
            .collect::<BTreeMap<_, _>>();
        let next_code = manufacturers.keys().max().map_or(1, |max| max + 1);

        Self {
            inner: RwLock::new(InMemoryManufacturers {
                manufacturers,
                next_code,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.manufacturers.len()
    }
}

impl Default for InMemoryManufacturerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManufacturerStore for InMemoryManufacturerRepository {
    async fn find_by_code(&self, code: i32) -> AppResult<Option<Manufacturer>> {
        Ok(self.inner.read().await.manufacturers.get(&code).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Manufacturer>> {
        let inner = self.inner.read().await;
        Ok(inner
            .manufacturers
            .values()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn save(&self, manufacturer: Manufacturer) -> AppResult<Manufacturer> {
        let mut inner = self.inner.write().await;

        let code = match manufacturer.code {
            Some(code) => {
                inner.next_code = inner.next_code.max(code + 1);
                code
            }
            None => {
                let code = inner.next_code;
                inner.next_code += 1;
                code
            }
        };

        let saved = Manufacturer::with_code(code, manufacturer.name);
        inner.manufacturers.insert(code, saved.clone());
        Ok(saved)
    }
}
