//! Tests for the per-image measurement pass

#[cfg(test)]
mod tests {
    use histospatial::MeasurementError;
    use histospatial::algorithm::executor::{MeasurementPass, measure_image};
    use histospatial::io::configuration::EngineConfig;
    use histospatial::io::table::Field;
    use histospatial::model::object::SegmentedObject;
    use histospatial::model::registry::Registry;

    fn objects(names: &[&str]) -> Vec<SegmentedObject> {
        names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| SegmentedObject::at(name, i as f64 * 10.0, 0.0))
            .collect()
    }

    // Each iteration measures one object until none are left
    #[test]
    fn test_iterations_advance_one_object() {
        let registry = Registry::new(
            objects(&["Nucleus_1", "Vessel_1", "Cell_1"]),
            EngineConfig::default(),
        );
        let mut pass = MeasurementPass::new(&registry);

        assert_eq!(pass.len(), 3);
        assert!(pass.execute_iteration());
        assert_eq!(pass.processed(), 1);
        assert!(pass.execute_iteration());
        assert!(pass.execute_iteration());
        assert!(!pass.execute_iteration());
        assert_eq!(pass.processed(), 3);
    }

    // Finishing early completes the remaining objects
    #[test]
    fn test_finish_completes_pass() {
        let registry = Registry::new(
            objects(&["Nucleus_2", "Nucleus_1", "Vessel_3"]),
            EngineConfig::default(),
        );
        let mut pass = MeasurementPass::new(&registry);
        pass.execute_iteration();

        let report = pass.finish();
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.objects.len(), 3);
    }

    // Rows come out in output order: vessels, then nuclei by number
    #[test]
    fn test_report_order() {
        let report = measure_image(
            objects(&["Nucleus_2", "Cell_1", "Nucleus_1", "Vessel_3"]),
            EngineConfig::default(),
        )
        .unwrap_or_else(|error| unreachable!("default config is valid: {error}"));

        let ids: Vec<&str> = report.rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["Vessel_3", "Nucleus_1", "Cell_1", "Nucleus_2"]);
        assert_eq!(
            report.objects.field(0, "ROI"),
            Some(&Field::Text("Vessel_3".to_string()))
        );
    }

    // Averages have one row per non-empty group
    #[test]
    fn test_report_averages() {
        let report = measure_image(
            objects(&["Nucleus_1", "Nucleus_2_Border", "Vessel_1"]),
            EngineConfig::default(),
        )
        .unwrap_or_else(|error| unreachable!("default config is valid: {error}"));

        let groups: Vec<&Field> = report
            .averages
            .rows()
            .iter()
            .filter_map(|row| row.first())
            .collect();
        let expected: Vec<Field> = [
            "Central Nuclei",
            "Border Nuclei",
            "All Nuclei",
            "Central Vessels",
            "All Vessels",
        ]
        .iter()
        .map(|name| Field::Text((*name).to_string()))
        .collect();
        assert_eq!(groups, expected.iter().collect::<Vec<_>>());
    }

    // Invalid configuration is rejected before any work
    #[test]
    fn test_measure_image_rejects_bad_config() {
        let result = measure_image(
            objects(&["Nucleus_1"]),
            EngineConfig {
                grid_cell_size: 0.0,
                ..EngineConfig::default()
            },
        );

        assert!(matches!(
            result,
            Err(MeasurementError::InvalidParameter {
                parameter: "grid_cell_size",
                ..
            })
        ));
    }

    // Empty images give header-only tables
    #[test]
    fn test_empty_image() {
        let report = measure_image(Vec::new(), EngineConfig::default())
            .unwrap_or_else(|error| unreachable!("default config is valid: {error}"));

        assert!(report.objects.is_empty());
        assert!(report.averages.is_empty());
        assert!(!report.objects.headers().is_empty());
    }
}
