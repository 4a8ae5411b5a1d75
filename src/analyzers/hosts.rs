use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::analyzers::types::HistogramBucket;
use crate::error::Result;
use crate::parser::ListingReader;
use crate::schema::Column;

/// Maps every host to the room ids it lists, in file order.
///
/// Repeated room ids are kept as they appear.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn host_listings(path: &Path) -> Result<BTreeMap<i64, Vec<i64>>> {
    let reader = ListingReader::open(path, &[Column::HostId, Column::RoomId])?;

    let mut listings: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    let rows = reader.try_for_each(|row| {
        let host_id = row.host_id()?;
        let room_id = row.room_id()?;
        listings.entry(host_id).or_default().push(room_id);
        Ok(())
    })?;

    debug!(rows, hosts = listings.len(), "Indexed host listings");
    Ok(listings)
}

/// Counts hosts by number of listings: `l[i]` is the number of hosts with exactly `i`.
///
/// The result always has `max listings + 1` slots, so an empty mapping gives `[0]`.
pub fn num_listings(listings: &BTreeMap<i64, Vec<i64>>) -> Vec<usize> {
    let highest = listings.values().map(Vec::len).max().unwrap_or(0);

    let mut histogram = vec![0; highest + 1];
    for rooms in listings.values() {
        histogram[rooms.len()] += 1;
    }
    histogram
}

/// Non-empty buckets of a [`num_listings`] histogram.
pub fn histogram_buckets(histogram: &[usize]) -> Vec<HistogramBucket> {
    histogram
        .iter()
        .enumerate()
        .filter(|&(_, &hosts)| hosts > 0)
        .map(|(listings, &hosts)| HistogramBucket { listings, hosts })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_host_listings_keeps_file_order_and_duplicates() {
        let file = write_csv(
            "room_id,host_id,room_type\n\
             10,1,Private room\n\
             11,2,Entire home/apt\n\
             12,1,Shared room\n\
             10,1,Private room\n",
        );

        let listings = host_listings(file.path()).unwrap();
        let expected = BTreeMap::from([(1, vec![10, 12, 10]), (2, vec![11])]);
        assert_eq!(listings, expected);
    }

    #[test]
    fn test_host_listings_header_only() {
        let file = write_csv("room_id,host_id\n");
        assert!(host_listings(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_num_listings_counts_hosts() {
        let listings = BTreeMap::from([
            (1, vec![10, 11, 12]),
            (2, vec![20]),
            (3, vec![30]),
            (4, vec![40, 41, 42]),
            (5, vec![50, 51, 52, 53, 54]),
        ]);

        let histogram = num_listings(&listings);
        assert_eq!(histogram, vec![0, 2, 0, 2, 0, 1]);
        assert_eq!(histogram.iter().sum::<usize>(), listings.len());
    }

    #[test]
    fn test_num_listings_empty_mapping() {
        assert_eq!(num_listings(&BTreeMap::new()), vec![0]);
    }

    #[test]
    fn test_histogram_buckets_skip_empty_slots() {
        assert_eq!(
            histogram_buckets(&[0, 2, 0, 1]),
            vec![
                HistogramBucket {
                    listings: 1,
                    hosts: 2
                },
                HistogramBucket {
                    listings: 3,
                    hosts: 1
                },
            ]
        );
    }
}
