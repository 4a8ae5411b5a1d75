use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::analyzers::types::{PriceChange, RoomSeriesRow};
use crate::error::{Error, Result};
use crate::parser::{ListingReader, snapshot_date};
use crate::schema::Column;

/// Builds each room's price history across dated snapshots.
///
/// Files are processed oldest first, ordered by the `-YYYY-MM-DD.csv` date
/// in their names (ties keep the given order). Only rows whose `room_type`
/// matches exactly contribute. A room's series starts at the first snapshot
/// it appears in and simply stops growing once it disappears.
///
/// # Errors
///
/// Fails on the first snapshot with an invalid name, a missing column, or a
/// malformed price or room id in a matching row.
#[tracing::instrument(skip(paths), fields(files = paths.len()))]
pub fn room_prices<P: AsRef<Path>>(paths: &[P], room_type: &str) -> Result<BTreeMap<i64, Vec<f64>>> {
    let mut snapshots = paths
        .iter()
        .map(|p| snapshot_date(p.as_ref()).map(|date| (date, p.as_ref())))
        .collect::<Result<Vec<_>>>()?;
    snapshots.sort_by_key(|&(date, _)| date);

    let mut series: BTreeMap<i64, Vec<f64>> = BTreeMap::new();

    for (date, path) in snapshots {
        let reader =
            ListingReader::open(path, &[Column::Price, Column::RoomId, Column::RoomType])?;

        let mut matched = 0usize;
        reader.try_for_each(|row| {
            if row.room_type() == room_type {
                let price = row.price()?;
                let room_id = row.room_id()?;
                series.entry(room_id).or_default().push(price);
                matched += 1;
            }
            Ok(())
        })?;

        debug!(%date, path = %path.display(), matched, "Merged snapshot prices");
    }

    info!(rooms = series.len(), "Built room price series");
    Ok(series)
}

/// Finds the room whose price moved the most, as an absolute percentage of its first price.
///
/// Rooms are visited in ascending id order and a later room replaces the
/// current maximum when its change is greater than *or equal to* it, so ties
/// go to the highest room id. A single-price series counts as a 0 % change.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] for an empty mapping or an empty
/// series, and [`Error::ZeroStartingPrice`] when a first price is zero.
pub fn price_change(series: &BTreeMap<i64, Vec<f64>>) -> Result<PriceChange> {
    let mut best: Option<PriceChange> = None;
    let mut maximum = 0.0;

    for (&room_id, prices) in series {
        let (Some(&start_price), Some(&end_price)) = (prices.first(), prices.last()) else {
            return Err(Error::insufficient(format!("room {room_id} has no prices")));
        };
        if start_price == 0.0 {
            return Err(Error::ZeroStartingPrice { room_id });
        }

        let change_pct = ((end_price - start_price) / start_price * 100.0).abs();
        if change_pct >= maximum {
            if change_pct == maximum && best.is_some() {
                debug!(room_id, change_pct, "Tied maximum, keeping later room");
            }
            maximum = change_pct;
            best = Some(PriceChange {
                room_id,
                change_pct,
                start_price,
                end_price,
            });
        }
    }

    match best {
        Some(change) => Ok(change),
        None if series.is_empty() => Err(Error::insufficient("no room price series")),
        None => {
            warn!(rooms = series.len(), "No comparable price change found");
            Err(Error::insufficient("no room has a comparable price change"))
        }
    }
}

/// One summary row per room, in room id order.
pub fn series_rows(series: &BTreeMap<i64, Vec<f64>>) -> Vec<RoomSeriesRow> {
    series
        .iter()
        .filter_map(|(&room_id, prices)| {
            Some(RoomSeriesRow {
                room_id,
                observations: prices.len(),
                first_price: *prices.first()?,
                last_price: *prices.last()?,
            })
        })
        .collect()
}
