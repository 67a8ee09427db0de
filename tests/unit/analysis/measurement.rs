//! Tests for measurement rows, column layout and shape descriptors

#[cfg(test)]
mod tests {
    use histospatial::algorithm::relationship::{Nearest, RelationshipRecord};
    use histospatial::analysis::measurement::{
        ColumnLayout, INTENSITY_COLUMNS, MeasurementRow, RELATIONSHIP_COLUMNS, SHAPE_COLUMNS,
        aspect_ratio, circularity, object_table, roundness, solidity,
    };
    use histospatial::io::table::Field;
    use histospatial::model::object::{IntensityStats, SegmentedObject};
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn nucleus() -> SegmentedObject {
        SegmentedObject::at("Nucleus_1", 10.0, 20.0)
            .unwrap_or_else(|| unreachable!("Nucleus prefix should be recognised"))
            .with_size(PI, 2.0 * PI)
            .with_ellipse(2.0, 2.0, 0.0)
    }

    fn value(row: &MeasurementRow, layout: &ColumnLayout, header: &str) -> f64 {
        layout
            .numeric_headers()
            .iter()
            .position(|candidate| candidate == header)
            .and_then(|column| row.values.get(column))
            .copied()
            .unwrap_or_else(|| unreachable!("unknown column {header}"))
    }

    // Circle of radius 1 is perfectly circular, round and unit aspect
    #[test]
    fn test_unit_circle_descriptors() {
        assert!((circularity(PI, 2.0 * PI).unwrap_or(f64::NAN) - 1.0).abs() < TOLERANCE);
        assert!((roundness(PI, 2.0).unwrap_or(f64::NAN) - 1.0).abs() < TOLERANCE);
        assert!((aspect_ratio(2.0, 2.0).unwrap_or(f64::NAN) - 1.0).abs() < TOLERANCE);
    }

    // Division by zero makes a descriptor absent
    #[test]
    fn test_non_finite_descriptors_absent() {
        assert_eq!(circularity(5.0, 0.0), None);
        assert_eq!(aspect_ratio(3.0, 0.0), None);
        assert_eq!(roundness(1.0, 0.0), None);
    }

    // Degenerate hull gives solidity 1
    #[test]
    fn test_solidity() {
        assert!((solidity(3.0, 4.0).unwrap_or(f64::NAN) - 0.75).abs() < TOLERANCE);
        assert!((solidity(3.0, 0.0).unwrap_or(f64::NAN) - 1.0).abs() < TOLERANCE);
    }

    // Stain columns only appear when an object carries a stain channel
    #[test]
    fn test_layout_stain_columns() {
        let plain = ColumnLayout::for_objects(&[nucleus()]);
        assert!(!plain.has_stains());
        assert_eq!(
            plain.numeric_width(),
            RELATIONSHIP_COLUMNS.len() + SHAPE_COLUMNS.len() + INTENSITY_COLUMNS.len()
        );

        let mut stained = nucleus();
        stained.channels.primary = Some(IntensityStats::default());
        let layout = ColumnLayout::for_objects(&[nucleus(), stained]);
        assert!(layout.has_stains());

        let headers = layout.numeric_headers();
        assert_eq!(headers.len(), layout.numeric_width());
        assert!(headers.contains(&"Hema_Mean".to_string()));
        assert_eq!(headers.last().map(String::as_str), Some("Eosin_Kurt"));
    }

    // Per-object headers interleave the relationship identifiers
    #[test]
    fn test_object_headers() {
        let headers = ColumnLayout::base_only().object_headers();
        let leading: Vec<&str> = headers.iter().take(7).map(String::as_str).collect();

        assert_eq!(
            leading,
            vec![
                "ROI",
                "Vessel Distance",
                "Closest Vessel",
                "Neighbor Count",
                "Closest Neighbor Distance",
                "Closest Neighbor",
                "Area"
            ]
        );
        assert_eq!(headers.len(), 6 + SHAPE_COLUMNS.len() + INTENSITY_COLUMNS.len());
    }

    // Row values carry geometry, descriptors and relationship metrics
    #[test]
    fn test_row_values() {
        let relationship = RelationshipRecord {
            vessel: Some(Nearest {
                id: "Vessel_2".to_string(),
                distance: 12.5,
            }),
            neighbor_count: 3,
            closest_neighbor: None,
        };
        let object = nucleus().with_base_channel(IntensityStats {
            mean: Some(4.0),
            ..IntensityStats::default()
        });
        let layout = ColumnLayout::base_only();
        let row = MeasurementRow::new(&object, relationship, &layout);

        assert_eq!(row.values.len(), layout.numeric_width());
        assert!((value(&row, &layout, "Vessel Distance") - 12.5).abs() < TOLERANCE);
        assert!((value(&row, &layout, "Neighbor Count") - 3.0).abs() < TOLERANCE);
        assert!(value(&row, &layout, "Closest Neighbor Distance").is_nan());
        assert!((value(&row, &layout, "X") - 10.0).abs() < TOLERANCE);
        assert!((value(&row, &layout, "Circ.") - 1.0).abs() < TOLERANCE);
        assert!((value(&row, &layout, "IntDen") - 4.0 * PI).abs() < TOLERANCE);
        assert!((value(&row, &layout, "Mean") - 4.0).abs() < TOLERANCE);
        assert!(value(&row, &layout, "StdDev").is_nan());
        assert!(value(&row, &layout, "Solidity").is_nan());
    }

    // Solidity uses the boundary polygon when present
    #[test]
    fn test_row_solidity_from_boundary() {
        let mut object = nucleus().with_size(3.0, 8.0);
        object.geometry.boundary = Some(vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [1.0, 1.0], [0.0, 2.0]]);
        object.geometry.convex_hull_area = Some(100.0);
        let layout = ColumnLayout::base_only();
        let row = MeasurementRow::new(&object, RelationshipRecord::default(), &layout);

        assert!((value(&row, &layout, "Solidity") - 0.75).abs() < TOLERANCE);
    }

    // Collinear or non-finite boundaries have no hull area and solidity 1
    #[test]
    fn test_row_solidity_degenerate_boundary() {
        let mut object = nucleus().with_size(3.0, 8.0);
        object.geometry.boundary = Some(vec![[0.0, 0.0], [1.0, 1.0], [f64::NAN, 4.0], [2.0, 2.0]]);
        let layout = ColumnLayout::base_only();
        let row = MeasurementRow::new(&object, RelationshipRecord::default(), &layout);

        assert!((value(&row, &layout, "Solidity") - 1.0).abs() < TOLERANCE);
    }

    // Table cells render identifiers as text and absent ones as absent
    #[test]
    fn test_object_table_fields() {
        let layout = ColumnLayout::base_only();
        let row = MeasurementRow::new(&nucleus(), RelationshipRecord::default(), &layout);
        let table = object_table(&[row], &layout);

        assert_eq!(table.field(0, "ROI"), Some(&Field::Text("Nucleus_1".to_string())));
        assert_eq!(table.field(0, "Closest Vessel"), Some(&Field::Absent));
        assert_eq!(table.field(0, "Neighbor Count"), Some(&Field::Count(0)));
        assert_eq!(table.field(0, "Area"), Some(&Field::Number(PI)));
    }
}
