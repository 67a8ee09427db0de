//! Tests for number formatting, quoting and table output

#[cfg(test)]
mod tests {
    use histospatial::io::error::MeasurementError;
    use histospatial::io::table::{
        Field, Table, TableFormat, render, write_table, write_table_file,
    };

    fn sample() -> Table {
        let mut table = Table::new(vec!["ROI".to_string(), "Area".to_string(), "Count".to_string()]);
        table.push_row(vec![
            Field::Text("Nucleus_1".to_string()),
            Field::Number(12.5),
            Field::Count(3),
        ]);
        table.push_row(vec![
            Field::Text("Vessel_2".to_string()),
            Field::Number(f64::NAN),
            Field::Absent,
        ]);
        table
    }

    // Fixed precision with trailing zeros and point stripped
    #[test]
    fn test_format_number_strips_zeros() {
        let format = TableFormat::COMMA;

        assert_eq!(format.format_number(12.5), "12.5");
        assert_eq!(format.format_number(3.0), "3");
        assert_eq!(format.format_number(100.0), "100");
        assert_eq!(format.format_number(0.1234567), "0.123457");
        assert_eq!(format.format_number(-2.25), "-2.25");
    }

    // Tiny negatives and negative zero render as plain zero
    #[test]
    fn test_format_number_negative_zero() {
        assert_eq!(TableFormat::COMMA.format_number(-0.0), "0");
        assert_eq!(TableFormat::COMMA.format_number(-0.000_000_1), "0");
    }

    // Semicolon format uses decimal commas
    #[test]
    fn test_format_number_decimal_comma() {
        assert_eq!(TableFormat::SEMICOLON.format_number(70.710678), "70,710678");
        assert_eq!(TableFormat::SEMICOLON.format_number(6.0), "6");
    }

    // Non-finite numbers become the absent marker
    #[test]
    fn test_format_number_absent() {
        assert_eq!(TableFormat::COMMA.format_number(f64::NAN), "N/A");
        assert_eq!(TableFormat::COMMA.format_number(f64::INFINITY), "N/A");
    }

    // Fields stay unquoted until they are written
    #[test]
    fn test_format_field_plain_text() {
        let format = TableFormat::SEMICOLON;

        assert_eq!(format.format_field(&Field::Text("a;b".to_string())), "a;b");
        assert_eq!(format.format_field(&Field::Number(1.5)), "1,5");
        assert_eq!(format.format_field(&Field::Count(7)), "7");
        assert_eq!(format.format_field(&Field::Absent), "N/A");
    }

    // Text with separators, quotes or newlines is quoted with quotes doubled
    #[test]
    fn test_quoting() {
        let mut table = Table::new(vec!["Name".to_string(), "Note".to_string()]);
        table.push_row(vec![Field::Text("a,b".to_string()), Field::Text("plain".to_string())]);
        table.push_row(vec![
            Field::Text("say \"hi\"".to_string()),
            Field::Text("two\nlines".to_string()),
        ]);
        table.push_row(vec![Field::Text("a;b".to_string()), Field::Absent]);

        assert_eq!(
            render(&table, TableFormat::COMMA).ok().as_deref(),
            Some("Name,Note\n\"a,b\",plain\n\"say \"\"hi\"\"\",\"two\nlines\"\na;b,N/A\n")
        );
        // Semicolons only matter to the semicolon format
        assert_eq!(
            render(&table, TableFormat::SEMICOLON).ok().as_deref(),
            Some("Name;Note\na,b;plain\n\"say \"\"hi\"\"\";\"two\nlines\"\n\"a;b\";N/A\n")
        );
    }

    // Decimal commas under a comma field separator get quoted
    #[test]
    fn test_decimal_comma_with_comma_fields() {
        let format = TableFormat {
            field_separator: ',',
            decimal_separator: ',',
        };
        let mut table = Table::new(vec!["ROI".to_string(), "Area".to_string()]);
        table.push_row(vec![Field::Text("x;y".to_string()), Field::Number(1.5)]);

        assert_eq!(render(&table, format).ok().as_deref(), Some("ROI,Area\nx;y,\"1,5\"\n"));
    }

    // Rendered tables have a header line and one line per row
    #[test]
    fn test_render_comma() {
        assert_eq!(
            render(&sample(), TableFormat::COMMA).ok().as_deref(),
            Some("ROI,Area,Count\nNucleus_1,12.5,3\nVessel_2,N/A,N/A\n")
        );
    }

    // Same table in the semicolon convention
    #[test]
    fn test_render_semicolon() {
        assert_eq!(
            render(&sample(), TableFormat::SEMICOLON).ok().as_deref(),
            Some("ROI;Area;Count\nNucleus_1;12,5;3\nVessel_2;N/A;N/A\n")
        );
    }

    // Rows narrower than the header are rejected instead of written
    #[test]
    fn test_render_rejects_ragged_rows() {
        let mut table = sample();
        table.push_row(vec![Field::Text("Cell_3".to_string())]);

        assert!(render(&table, TableFormat::COMMA).is_err());
    }

    // Writing to any writer matches the rendered string
    #[test]
    fn test_write_table_to_buffer() {
        let mut buffer = Vec::new();
        let result = write_table(&mut buffer, &sample(), TableFormat::COMMA);

        assert!(result.is_ok());
        assert_eq!(
            Some(String::from_utf8_lossy(&buffer).into_owned()),
            render(&sample(), TableFormat::COMMA).ok()
        );
    }

    // Files are written under freshly created directories
    #[test]
    fn test_write_table_file_creates_directories() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory should be available");
        };
        let path = dir.path().join("individual").join("image_data.csv");

        let result = write_table_file(&path, &sample(), TableFormat::COMMA);
        assert!(result.is_ok());

        let written = std::fs::read_to_string(&path).unwrap_or_default();
        assert!(written.starts_with("ROI,Area,Count\n"));
    }

    // Unwritable destinations report the path
    #[test]
    fn test_write_table_file_unwritable() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory should be available");
        };
        let blocker = dir.path().join("blocker");
        assert!(std::fs::write(&blocker, "not a directory").is_ok());

        let path = blocker.join("image_data.csv");
        let Err(error) = write_table_file(&path, &sample(), TableFormat::COMMA) else {
            unreachable!("writing below a regular file must fail");
        };
        assert!(error.to_string().contains("blocker"));
    }

    // Table errors while writing a file carry the destination path
    #[test]
    fn test_write_table_file_ragged_rows() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory should be available");
        };
        let path = dir.path().join("ragged_data.csv");
        let mut table = sample();
        table.push_row(vec![Field::Count(1)]);

        let Err(error) = write_table_file(&path, &table, TableFormat::COMMA) else {
            unreachable!("ragged rows must fail");
        };
        assert!(matches!(error, MeasurementError::TableWrite { .. }));
        assert!(error.to_string().contains("ragged_data.csv"));
    }

    // Field lookup by header name
    #[test]
    fn test_field_lookup() {
        let table = sample();

        assert_eq!(table.column("Count"), Some(2));
        assert_eq!(table.field(1, "ROI"), Some(&Field::Text("Vessel_2".to_string())));
        assert_eq!(table.field(5, "ROI"), None);
        assert_eq!(table.field(0, "Missing"), None);
        assert_eq!(table.len(), 2);
    }
}
