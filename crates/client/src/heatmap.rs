use rust_decimal::Decimal;
use storage::models::MatchRecord;

use crate::error::Result;
use crate::format::round2;

/// Heatmaps of one record, ready for the heatmap detail view
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapView {
    pub outer: Vec<Decimal>,
    pub inner: Vec<Decimal>,
    pub pickup: Vec<Decimal>,
}

fn parse(raw: &str) -> Result<Vec<Decimal>> {
    let cells: Vec<f64> = serde_json::from_str(raw)?;
    Ok(cells.into_iter().map(round2).collect())
}

impl HeatmapView {
    /// Decode the record's serialized heatmaps. The record is not modified.
    pub fn from_record(record: &MatchRecord) -> Result<Self> {
        Ok(Self {
            outer: parse(&record.outer_heatmap)?,
            inner: parse(&record.inner_heatmap)?,
            pickup: parse(&record.pickup_heatmap)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_rounded() {
        let record = MatchRecord {
            outer_heatmap: "[0.333333, 1, 2.678]".to_string(),
            inner_heatmap: "[]".to_string(),
            pickup_heatmap: "[4.5]".to_string(),
            ..Default::default()
        };

        let view = HeatmapView::from_record(&record).unwrap();
        assert_eq!(view.outer, vec![Decimal::new(33, 2), Decimal::ONE, Decimal::new(268, 2)]);
        assert!(view.inner.is_empty());
        assert_eq!(view.pickup, vec![Decimal::new(45, 1)]);
        assert_eq!(record.outer_heatmap, "[0.333333, 1, 2.678]");
    }

    #[test]
    fn test_malformed_heatmap_is_an_error() {
        let record = MatchRecord {
            outer_heatmap: "[1,2".to_string(),
            inner_heatmap: "[]".to_string(),
            pickup_heatmap: "[]".to_string(),
            ..Default::default()
        };
        assert!(HeatmapView::from_record(&record).is_err());
    }
}
