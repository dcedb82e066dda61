// Bulk delegate import from a registration CSV export

use crate::identity::Address;
use crate::input::grant::parse_user_address;
use crate::input::InputError;
use crate::registrar::{DelegateRegistration, FusionRole};
use std::collections::HashSet;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Column layout: `[*, *, *, *, name, owner, withdraw, producer, ...]`
const NAME_COLUMN: usize = 4;
const OWNER_COLUMN: usize = 5;
const WITHDRAW_COLUMN: usize = 6;
const PRODUCER_COLUMN: usize = 7;
pub const MIN_ROW_COLUMNS: usize = 8;

impl DelegateRegistration {
    /// Read a delegate from one CSV row. Rows without a name are not
    /// registrations and yield `None`.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Result<Option<Self>, InputError> {
        // only a truly empty cell marks a non-registration; the name is kept verbatim
        let name = row.get(NAME_COLUMN).map(|s| s.as_ref()).unwrap_or("");
        if name.is_empty() {
            return Ok(None);
        }
        if row.len() < MIN_ROW_COLUMNS {
            return Err(InputError::ShortRow {
                name: name.to_string(),
                expected: MIN_ROW_COLUMNS,
                got: row.len(),
            });
        }
        Ok(Some(Self {
            name: name.to_string(),
            owner: parse_user_address(row[OWNER_COLUMN].as_ref())?,
            withdraw: parse_user_address(row[WITHDRAW_COLUMN].as_ref())?,
            producer: parse_user_address(row[PRODUCER_COLUMN].as_ref())?,
        }))
    }
}

/// Parse every registration from a CSV export. The first row is a header.
/// Fails on the first bad row; nothing is returned for a partially valid file.
pub fn parse_registrations<R: io::Read>(reader: R) -> Result<Vec<DelegateRegistration>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut registrations = Vec::new();
    let mut names = HashSet::new();
    let mut role_anchors: HashSet<(Address, FusionRole)> = HashSet::new();
    let mut skipped = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        let row: Vec<&str> = record.iter().collect();
        let registration = match DelegateRegistration::from_row(&row)? {
            Some(registration) => registration,
            None => {
                skipped += 1;
                continue;
            }
        };

        if !names.insert(registration.name.clone()) {
            return Err(InputError::duplicate("delegate name", &registration.name));
        }
        // each role anchors one fusion id, so the same address may not fill a role twice
        for anchor in [
            (registration.owner, FusionRole::Owner),
            (registration.withdraw, FusionRole::Withdraw),
            (registration.producer, FusionRole::Producer),
        ] {
            if !role_anchors.insert(anchor) {
                return Err(InputError::duplicate(
                    "delegate role address",
                    format!("{} ({:?})", anchor.0, anchor.1),
                ));
            }
        }

        debug!(name = %registration.name, "accepted delegate registration");
        registrations.push(registration);
    }

    info!(accepted = registrations.len(), skipped, "parsed delegate registrations");
    Ok(registrations)
}

/// Open and parse a registration CSV file
pub fn read_registrations(path: &Path) -> Result<Vec<DelegateRegistration>, InputError> {
    let file = std::fs::File::open(path).map_err(|e| InputError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_registrations(file)
}
