use std::path::Path;

use tracing::debug;

use crate::analyzers::types::PriceSatisfaction;
use crate::error::Result;
use crate::parser::ListingReader;
use crate::schema::Column;

/// Reads `(price, overall_satisfaction)` for every listing with at least one review.
///
/// All three fields are parsed on every row, so a malformed value in an
/// unreviewed listing is still an error.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn price_satisfaction(path: &Path) -> Result<Vec<PriceSatisfaction>> {
    let reader = ListingReader::open(
        path,
        &[Column::Price, Column::OverallSatisfaction, Column::Reviews],
    )?;

    let mut points = Vec::new();
    let rows = reader.try_for_each(|row| {
        let price = row.price()?;
        let satisfaction = row.satisfaction()?;
        let reviews = row.reviews()?;

        if reviews > 0 {
            points.push(PriceSatisfaction {
                price,
                satisfaction,
            });
        }
        Ok(())
    })?;

    debug!(rows, kept = points.len(), "Extracted reviewed listings");
    Ok(points)
}
