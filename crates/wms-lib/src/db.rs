use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::hierarchy::{Aisle, Bin, Shelf, WarehouseHierarchy, WarehouseSummary, Zone, ZoneType};
use crate::repository::{
    InMemoryRepository, InventoryRepository, Product, ProductBin, WarehouseRepository,
};

/// Tables (and the columns we read from them) a warehouse database must carry.
const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    ("warehouses", &["id", "name", "address", "total_capacity"]),
    ("zones", &["id", "warehouse_id", "name", "zone_type"]),
    ("aisles", &["id", "zone_id", "code"]),
    ("shelves", &["id", "aisle_id", "code", "levels"]),
    ("bins", &["id", "shelf_id", "code", "capacity", "occupied"]),
    ("products", &["sku", "name", "unit"]),
    ("product_locations", &["sku", "warehouse_id", "bin_code", "quantity"]),
];

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS warehouses (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT,
    total_capacity REAL NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS zones (
    id TEXT PRIMARY KEY,
    warehouse_id TEXT NOT NULL REFERENCES warehouses(id),
    name TEXT NOT NULL,
    zone_type TEXT
);
CREATE TABLE IF NOT EXISTS aisles (
    id TEXT PRIMARY KEY,
    zone_id TEXT NOT NULL REFERENCES zones(id),
    code TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS shelves (
    id TEXT PRIMARY KEY,
    aisle_id TEXT NOT NULL REFERENCES aisles(id),
    code TEXT NOT NULL,
    levels INTEGER NOT NULL DEFAULT 4
);
CREATE TABLE IF NOT EXISTS bins (
    id TEXT PRIMARY KEY,
    shelf_id TEXT NOT NULL REFERENCES shelves(id),
    code TEXT NOT NULL,
    capacity REAL NOT NULL DEFAULT 100,
    occupied REAL NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_bins_shelf_code ON bins(shelf_id, code);
CREATE TABLE IF NOT EXISTS products (
    sku TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    unit TEXT NOT NULL DEFAULT 'UN'
);
CREATE TABLE IF NOT EXISTS product_locations (
    sku TEXT NOT NULL REFERENCES products(sku),
    warehouse_id TEXT NOT NULL REFERENCES warehouses(id),
    bin_code TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    PRIMARY KEY (sku, warehouse_id, bin_code)
);
";

/// Read-only repository backed by a SQLite database file.
///
/// A fresh connection is opened for every call, so the repository itself is
/// trivially `Send + Sync` and holds no connection state between requests.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    path: PathBuf,
}

impl SqliteRepository {
    /// Validate that `path` exists and carries the warehouse tables.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(Error::DatabaseNotFound { path });
        }

        let repository = Self { path };
        let connection = repository.connection()?;
        verify_schema(&connection)?;
        debug!(path = %repository.path.display(), "warehouse database opened");
        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Connection::open_with_flags(&self.path, flags).map_err(|err| {
            if self.path.is_file() {
                Error::Sqlite(err)
            } else {
                Error::DatabaseNotFound {
                    path: self.path.clone(),
                }
            }
        })
    }
}

impl WarehouseRepository for SqliteRepository {
    fn warehouses(&self) -> Result<Vec<WarehouseSummary>> {
        let connection = self.connection()?;
        let mut stmt = connection.prepare(
            "SELECT id, name, address, total_capacity FROM warehouses ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], row_to_warehouse)?;

        let mut warehouses = Vec::new();
        for row in rows {
            warehouses.push(row?);
        }
        Ok(warehouses)
    }

    fn hierarchy(&self, warehouse_id: &str) -> Result<WarehouseHierarchy> {
        let connection = self.connection()?;
        let warehouse = connection
            .query_row(
                "SELECT id, name, address, total_capacity FROM warehouses WHERE id = ?1",
                [warehouse_id],
                row_to_warehouse,
            )
            .optional()?
            .ok_or_else(|| Error::WarehouseNotFound {
                warehouse_id: warehouse_id.to_string(),
            })?;

        let mut bins = load_bins(&connection, warehouse_id)?;
        let mut shelves = load_shelves(&connection, warehouse_id, &mut bins)?;
        let mut aisles = load_aisles(&connection, warehouse_id, &mut shelves)?;
        let zones = load_zones(&connection, warehouse_id, &mut aisles)?;

        let hierarchy = WarehouseHierarchy { warehouse, zones };
        debug!(
            warehouse_id = %warehouse_id,
            bins = hierarchy.bin_count(),
            "warehouse hierarchy loaded"
        );
        Ok(hierarchy)
    }
}

impl InventoryRepository for SqliteRepository {
    fn product_bins(&self, sku: &str) -> Result<Vec<ProductBin>> {
        let connection = self.connection()?;
        let mut stmt = connection.prepare(
            "SELECT pl.warehouse_id, b.code, pl.quantity, b.capacity, b.occupied \
             FROM product_locations pl \
             JOIN zones z ON z.warehouse_id = pl.warehouse_id \
             JOIN aisles a ON a.zone_id = z.id \
             JOIN shelves s ON s.aisle_id = a.id \
             JOIN bins b ON b.shelf_id = s.id AND b.code = pl.bin_code \
             WHERE pl.sku = ?1 \
             ORDER BY pl.rowid",
        )?;
        let rows = stmt.query_map([sku], |row| {
            Ok(ProductBin {
                warehouse_id: row.get(0)?,
                bin_code: row.get(1)?,
                quantity: row.get(2)?,
                capacity: row.get(3)?,
                occupied: row.get(4)?,
            })
        })?;

        let mut bins = Vec::new();
        for row in rows {
            bins.push(row?);
        }
        Ok(bins)
    }
}

/// Create the warehouse tables if they do not exist yet.
pub fn create_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Insert or replace a full warehouse hierarchy in one transaction.
pub fn write_hierarchy(connection: &mut Connection, hierarchy: &WarehouseHierarchy) -> Result<()> {
    let tx = connection.transaction()?;
    let warehouse = &hierarchy.warehouse;
    tx.execute(
        "INSERT OR REPLACE INTO warehouses (id, name, address, total_capacity) \
         VALUES (?1, ?2, ?3, ?4)",
        params![
            warehouse.id,
            warehouse.name,
            warehouse.address,
            warehouse.total_capacity
        ],
    )?;

    for zone in &hierarchy.zones {
        tx.execute(
            "INSERT OR REPLACE INTO zones (id, warehouse_id, name, zone_type) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                zone.id,
                warehouse.id,
                zone.name,
                zone.zone_type.map(ZoneType::as_str)
            ],
        )?;
        for aisle in &zone.aisles {
            tx.execute(
                "INSERT OR REPLACE INTO aisles (id, zone_id, code) VALUES (?1, ?2, ?3)",
                params![aisle.id, zone.id, aisle.code],
            )?;
            for shelf in &aisle.shelves {
                tx.execute(
                    "INSERT OR REPLACE INTO shelves (id, aisle_id, code, levels) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![shelf.id, aisle.id, shelf.code, shelf.levels],
                )?;
                for bin in &shelf.bins {
                    tx.execute(
                        "INSERT OR REPLACE INTO bins (id, shelf_id, code, capacity, occupied) \
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![bin.id, shelf.id, bin.code, bin.capacity, bin.occupied],
                    )?;
                }
            }
        }
    }

    tx.commit()?;
    debug!(
        warehouse_id = %warehouse.id,
        bins = hierarchy.bin_count(),
        "warehouse hierarchy written"
    );
    Ok(())
}

/// Insert or replace a product and all of its stock locations.
pub fn write_product(connection: &mut Connection, product: &Product) -> Result<()> {
    let tx = connection.transaction()?;
    tx.execute(
        "INSERT OR REPLACE INTO products (sku, name, unit) VALUES (?1, ?2, ?3)",
        params![product.sku, product.name, product.unit],
    )?;
    tx.execute("DELETE FROM product_locations WHERE sku = ?1", [&product.sku])?;
    for location in &product.locations {
        tx.execute(
            "INSERT INTO product_locations (sku, warehouse_id, bin_code, quantity) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                product.sku,
                location.warehouse_id,
                location.bin_code,
                location.quantity
            ],
        )?;
    }
    tx.commit()?;
    debug!(
        sku = %product.sku,
        locations = product.locations.len(),
        total_quantity = product.total_quantity(),
        "product written"
    );
    Ok(())
}

/// Create `path` (if needed), its schema, and copy every warehouse and
/// product from `source` into it.
pub fn write_database(path: &Path, source: &InMemoryRepository) -> Result<()> {
    let mut connection = Connection::open(path)?;
    create_schema(&connection)?;
    for hierarchy in source.hierarchies() {
        write_hierarchy(&mut connection, hierarchy)?;
    }
    for product in source.products() {
        write_product(&mut connection, product)?;
    }
    Ok(())
}

fn verify_schema(connection: &Connection) -> Result<()> {
    for (table, columns) in REQUIRED_TABLES {
        if !table_exists(connection, table)? || !table_has_columns(connection, table, columns)? {
            warn!(table, "warehouse database is missing a required table or column");
            return Err(Error::UnsupportedSchema);
        }
    }
    Ok(())
}

fn load_bins(connection: &Connection, warehouse_id: &str) -> Result<HashMap<String, Vec<Bin>>> {
    let mut stmt = connection.prepare(
        "SELECT b.shelf_id, b.id, b.code, b.capacity, b.occupied \
         FROM bins b \
         JOIN shelves s ON s.id = b.shelf_id \
         JOIN aisles a ON a.id = s.aisle_id \
         JOIN zones z ON z.id = a.zone_id \
         WHERE z.warehouse_id = ?1 \
         ORDER BY b.rowid",
    )?;
    let rows = stmt.query_map([warehouse_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            Bin {
                id: row.get(1)?,
                code: row.get(2)?,
                capacity: row.get(3)?,
                occupied: row.get(4)?,
            },
        ))
    })?;

    let mut grouped: HashMap<String, Vec<Bin>> = HashMap::new();
    for row in rows {
        let (shelf_id, bin) = row?;
        grouped.entry(shelf_id).or_default().push(bin);
    }
    Ok(grouped)
}

fn load_shelves(
    connection: &Connection,
    warehouse_id: &str,
    bins: &mut HashMap<String, Vec<Bin>>,
) -> Result<HashMap<String, Vec<Shelf>>> {
    let mut stmt = connection.prepare(
        "SELECT s.aisle_id, s.id, s.code, s.levels \
         FROM shelves s \
         JOIN aisles a ON a.id = s.aisle_id \
         JOIN zones z ON z.id = a.zone_id \
         WHERE z.warehouse_id = ?1 \
         ORDER BY s.rowid",
    )?;
    let rows = stmt.query_map([warehouse_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, u32>(3)?,
        ))
    })?;

    let mut grouped: HashMap<String, Vec<Shelf>> = HashMap::new();
    for row in rows {
        let (aisle_id, id, code, levels) = row?;
        let shelf_bins = bins.remove(&id).unwrap_or_default();
        grouped.entry(aisle_id).or_default().push(Shelf {
            id,
            code,
            levels,
            bins: shelf_bins,
        });
    }
    Ok(grouped)
}

fn load_aisles(
    connection: &Connection,
    warehouse_id: &str,
    shelves: &mut HashMap<String, Vec<Shelf>>,
) -> Result<HashMap<String, Vec<Aisle>>> {
    let mut stmt = connection.prepare(
        "SELECT a.zone_id, a.id, a.code \
         FROM aisles a \
         JOIN zones z ON z.id = a.zone_id \
         WHERE z.warehouse_id = ?1 \
         ORDER BY a.rowid",
    )?;
    let rows = stmt.query_map([warehouse_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut grouped: HashMap<String, Vec<Aisle>> = HashMap::new();
    for row in rows {
        let (zone_id, id, code) = row?;
        let aisle_shelves = shelves.remove(&id).unwrap_or_default();
        grouped.entry(zone_id).or_default().push(Aisle {
            id,
            code,
            shelves: aisle_shelves,
        });
    }
    Ok(grouped)
}

fn load_zones(
    connection: &Connection,
    warehouse_id: &str,
    aisles: &mut HashMap<String, Vec<Aisle>>,
) -> Result<Vec<Zone>> {
    let mut stmt = connection.prepare(
        "SELECT id, name, zone_type FROM zones WHERE warehouse_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map([warehouse_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut zones = Vec::new();
    for row in rows {
        let (id, name, zone_type) = row?;
        let zone_type = match zone_type.as_deref().map(str::parse::<ZoneType>) {
            Some(Ok(zone_type)) => Some(zone_type),
            Some(Err(reason)) => {
                warn!(zone_id = %id, %reason, "ignoring zone type");
                None
            }
            None => None,
        };
        let zone_aisles = aisles.remove(&id).unwrap_or_default();
        zones.push(Zone {
            id,
            name,
            zone_type,
            aisles: zone_aisles,
        });
    }
    Ok(zones)
}

fn row_to_warehouse(row: &Row<'_>) -> rusqlite::Result<WarehouseSummary> {
    Ok(WarehouseSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        total_capacity: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
    })
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
