//! Synthetic marketplace dataset
//!
//! Produces `users` and `items` tables shaped like a flea-market schema.
//! Output is fully determined by the settings: the same seed always yields
//! the same records, byte for byte.
//!
//! # Invariants
//!
//! - User ids are `1..=users`, item ids are `1..=items`
//! - `buyer_id` is 0 exactly when `status` is `on_sale`
//! - A sold item's buyer is never its seller
//! - `updated_at >= created_at`

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, TimeZone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::observability::{log_event_with_fields, Event, Timer};
use crate::record::Record;

use super::errors::{GenerateError, GenerateResult};
use super::{Dataset, ITEMS_FILE, USERS_FILE};

/// 2019-08-12 15:00:00 +09:00
const BASE_EPOCH: i64 = 1_565_589_600;
const JST_OFFSET_SECS: i32 = 9 * 3600;
const DAY_SECS: i64 = 24 * 3600;

const ITEM_CREATED_SPAN: i64 = 60 * DAY_SECS;
const ITEM_UPDATED_SPAN: i64 = 7 * DAY_SECS;
const USER_CREATED_SPAN: i64 = 365 * DAY_SECS;

/// Item statuses with their relative weights
const STATUSES: [(&str, u32); 5] = [
    ("on_sale", 60),
    ("trading", 10),
    ("sold_out", 25),
    ("stop", 3),
    ("cancel", 2),
];

const CATEGORY_IDS: [i64; 12] = [2, 3, 4, 10, 11, 12, 20, 21, 22, 30, 31, 32];

const ADJECTIVES: [&str; 8] = [
    "vintage", "compact", "handmade", "classic", "wireless", "leather", "wooden", "limited",
];
const NOUNS: [&str; 8] = [
    "camera", "backpack", "lamp", "jacket", "keyboard", "teapot", "watch", "sneakers",
];
const STREETS: [&str; 6] = [
    "Shibuya", "Shinjuku", "Minato", "Meguro", "Setagaya", "Nakano",
];

/// What to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub users: usize,
    pub items: usize,
    pub seed: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            users: 1000,
            items: 50_000,
            seed: 42,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> GenerateResult<()> {
        if self.items > 0 && self.users == 0 {
            return Err(GenerateError::InvalidSettings(
                "items need at least one user to sell them".to_string(),
            ));
        }
        Ok(())
    }
}

/// Seeded record generator
pub struct Generator {
    settings: GeneratorSettings,
    rng: StdRng,
}

impl Generator {
    pub fn new(settings: GeneratorSettings) -> GenerateResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            rng: StdRng::seed_from_u64(settings.seed),
        })
    }

    /// Generate both tables in memory
    pub fn generate(&mut self) -> GenerateResult<Dataset> {
        let mut sell_counts = vec![0i64; self.settings.users];
        let mut items = Vec::with_capacity(self.settings.items);
        for id in 1..=self.settings.items {
            let item = self.item(id as i64)?;
            if let Some(count) = item
                .get("seller_id")
                .and_then(|v| v.as_i64())
                .and_then(|seller| sell_counts.get_mut((seller - 1) as usize))
            {
                *count += 1;
            }
            items.push(item);
        }

        let mut users = Vec::with_capacity(self.settings.users);
        for (idx, num_sell_items) in sell_counts.into_iter().enumerate() {
            users.push(self.user(idx as i64 + 1, num_sell_items)?);
        }

        Ok(Dataset { users, items })
    }

    fn user(&mut self, id: i64, num_sell_items: i64) -> GenerateResult<Record> {
        let adjective = self.pick(&ADJECTIVES);
        let street = self.pick(&STREETS);
        let block = self.rng.gen_range(1..=9);
        let lot = self.rng.gen_range(1..=40);
        let created_at = timestamp(BASE_EPOCH - self.rng.gen_range(0..USER_CREATED_SPAN))?;

        Ok(Record::new()
            .with("id", id)
            .with("account_name", format!("{}_user{}", adjective, id))
            .with("num_sell_items", num_sell_items)
            .with("address", format!("{}-{} {}, Tokyo", block, lot, street))
            .with("created_at", created_at))
    }

    fn item(&mut self, id: i64) -> GenerateResult<Record> {
        let users = self.settings.users as i64;
        let seller_id = self.rng.gen_range(1..=users);

        let mut status = self.status();
        let buyer_id = if status == "on_sale" {
            0
        } else if users < 2 {
            // Nobody else to buy it
            status = "on_sale";
            0
        } else {
            let candidate = self.rng.gen_range(1..users);
            if candidate >= seller_id {
                candidate + 1
            } else {
                candidate
            }
        };

        let adjective = self.pick(&ADJECTIVES);
        let noun = self.pick(&NOUNS);
        let category_id = self.pick(&CATEGORY_IDS);
        let price = self.rng.gen_range(1..=1000i64) * 100;
        let created_secs = BASE_EPOCH - self.rng.gen_range(0..ITEM_CREATED_SPAN);
        let updated_secs = created_secs + self.rng.gen_range(0..=ITEM_UPDATED_SPAN);

        Ok(Record::new()
            .with("id", id)
            .with("seller_id", seller_id)
            .with("buyer_id", buyer_id)
            .with("status", status)
            .with("name", format!("{} {}", adjective, noun))
            .with("price", price)
            .with(
                "description",
                format!("A {} {} in good condition. Item #{}.", adjective, noun, id),
            )
            .with("category_id", category_id)
            .with("created_at", timestamp(created_secs)?)
            .with("updated_at", timestamp(updated_secs)?))
    }

    fn status(&mut self) -> &'static str {
        let total: u32 = STATUSES.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total);
        for (status, weight) in STATUSES {
            if roll < weight {
                return status;
            }
            roll -= weight;
        }
        STATUSES[0].0
    }

    fn pick<T: Copy>(&mut self, choices: &[T]) -> T {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

fn timestamp(secs: i64) -> GenerateResult<DateTime<FixedOffset>> {
    FixedOffset::east_opt(JST_OFFSET_SECS)
        .and_then(|offset| offset.timestamp_opt(secs, 0).single())
        .ok_or(GenerateError::Timestamp(secs))
}

/// Write a table as NDJSON
pub fn write_table(path: &Path, records: &[Record]) -> GenerateResult<()> {
    let io_err = |e: io::Error| GenerateError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, &record.to_json())?;
        writer.write_all(b"\n").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Generate a dataset and write `users.json` and `items.json` into `data_dir`
pub fn generate(settings: GeneratorSettings, data_dir: &Path) -> GenerateResult<Dataset> {
    let timer = Timer::new();

    let dataset = Generator::new(settings)?.generate()?;

    fs::create_dir_all(data_dir).map_err(|e| GenerateError::Io {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    write_table(&data_dir.join(USERS_FILE), &dataset.users)?;
    write_table(&data_dir.join(ITEMS_FILE), &dataset.items)?;

    log_event_with_fields(
        Event::DatasetGenerated,
        &[
            ("data_dir", data_dir.display().to_string().as_str()),
            ("elapsed_ms", timer.elapsed_ms().as_str()),
            ("items", dataset.items.len().to_string().as_str()),
            ("seed", settings.seed.to_string().as_str()),
            ("users", dataset.users.len().to_string().as_str()),
        ],
    );

    Ok(dataset)
}
