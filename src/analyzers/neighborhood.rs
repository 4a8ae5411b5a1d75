use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use tracing::{debug, warn};

use crate::analyzers::types::NeighborhoodPrice;
use crate::error::{Error, Result};
use crate::parser::ListingReader;
use crate::schema::Column;

/// Room type whose prices are averaged.
pub const ENTIRE_HOME: &str = "Entire home/apt";

/// How "Entire home/apt" prices are attributed to neighborhoods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NeighborhoodMode {
    /// One average per neighborhood.
    #[default]
    Grouped,
    /// Legacy report: a single average over every entire home, truncated
    /// to whole units and labelled with the last row's neighborhood.
    LastSeen,
}

/// Average "Entire home/apt" price by neighborhood.
///
/// In [`NeighborhoodMode::Grouped`] each neighborhood with at least one
/// entire home gets its own average. [`NeighborhoodMode::LastSeen`]
/// reproduces the legacy report, which pools every entire home in the file
/// into one average of whole-unit prices and files it under whatever
/// neighborhood the final row (of any room type) belongs to.
///
/// # Errors
///
/// Malformed prices are fatal in both modes. `LastSeen` returns
/// [`Error::InsufficientData`] when no entire homes are listed.
#[tracing::instrument(skip_all, fields(path = %path.display(), mode = ?mode))]
pub fn price_by_neighborhood(path: &Path, mode: NeighborhoodMode) -> Result<BTreeMap<String, f64>> {
    let reader = ListingReader::open(
        path,
        &[Column::Neighborhood, Column::Price, Column::RoomType],
    )?;

    match mode {
        NeighborhoodMode::Grouped => grouped(reader),
        NeighborhoodMode::LastSeen => last_seen(reader),
    }
}

fn grouped(reader: ListingReader) -> Result<BTreeMap<String, f64>> {
    let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    reader.try_for_each(|row| {
        let price = row.price()?;
        if row.room_type() == ENTIRE_HOME {
            let (sum, count) = totals.entry(row.neighborhood().to_string()).or_default();
            *sum += price;
            *count += 1;
        }
        Ok(())
    })?;

    debug!(neighborhoods = totals.len(), "Grouped entire-home prices");
    Ok(totals
        .into_iter()
        .map(|(neighborhood, (sum, count))| (neighborhood, sum / count as f64))
        .collect())
}

fn last_seen(reader: ListingReader) -> Result<BTreeMap<String, f64>> {
    let mut total = 0.0;
    let mut count = 0usize;
    let mut neighborhood = String::new();

    reader.try_for_each(|row| {
        neighborhood.clear();
        neighborhood.push_str(row.neighborhood());

        let price = row.price()?.trunc();
        if row.room_type() == ENTIRE_HOME {
            total += price;
            count += 1;
        }
        Ok(())
    })?;

    if count == 0 {
        return Err(Error::insufficient(format!(
            "no \"{ENTIRE_HOME}\" listings to average"
        )));
    }

    warn!(
        %neighborhood,
        listings = count,
        "Reporting one pooled average under the last neighborhood read"
    );
    Ok(BTreeMap::from([(neighborhood, total / count as f64)]))
}

/// Flattens an average-price map into report rows.
pub fn neighborhood_rows(averages: BTreeMap<String, f64>) -> Vec<NeighborhoodPrice> {
    averages
        .into_iter()
        .map(|(neighborhood, average_price)| NeighborhoodPrice {
            neighborhood,
            average_price,
        })
        .collect()
}
