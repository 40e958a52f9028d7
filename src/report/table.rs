use std::fmt::Write;

use super::ParcelReport;

/// Render a bearing or angle as degrees, minutes and seconds (e.g. `090°00'00"`)
pub fn format_dms(degrees: f64) -> String {
    const FULL_CIRCLE: u64 = 360 * 3600;

    let total = ((degrees * 3600.0).round() as i64).rem_euclid(FULL_CIRCLE as i64) as u64;
    let d = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;

    format!("{:03}°{:02}'{:02}\"", d, m, s)
}

/// Format with a comma thousands separator, e.g. `12,345.68`
pub fn format_thousands(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Fixed-width traverse sheet followed by the area summary
pub fn format_table(report: &ParcelReport, precision: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<6} {:>14} {:>14} {:>11} {:>12} {:>12}",
        "Beacon", "Easting", "Northing", "Distance", "Bearing", "Angle"
    );
    let _ = writeln!(out, "{}", "-".repeat(74));

    for rec in &report.records {
        let angle = rec
            .angle
            .map(format_dms)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<6} {:>14.*} {:>14.*} {:>11.*} {:>12} {:>12}",
            rec.label(),
            precision,
            rec.start.easting,
            precision,
            rec.start.northing,
            precision,
            rec.distance,
            format_dms(rec.bearing),
            angle
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Area:      {} m²", format_thousands(report.area, precision));
    let _ = writeln!(
        out,
        "Perimeter: {} m",
        format_thousands(report.perimeter, precision)
    );
    let _ = writeln!(
        out,
        "Centroid:  {:.*}, {:.*}",
        precision, report.centroid.easting, precision, report.centroid.northing
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;
    use crate::report::SurveyOptions;

    #[test]
    fn test_format_dms() {
        assert_eq!(format_dms(0.0), "000°00'00\"");
        assert_eq!(format_dms(90.0), "090°00'00\"");
        assert_eq!(format_dms(45.5125), "045°30'45\"");
        // Rounds up into the next full circle
        assert_eq!(format_dms(359.99999), "000°00'00\"");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(100.0, 2), "100.00");
        assert_eq!(format_thousands(999.999, 2), "1,000.00");
        assert_eq!(format_thousands(-1234.5, 1), "-1,234.5");
        assert_eq!(format_thousands(1234.0, 0), "1,234");
    }

    #[test]
    fn test_format_table() {
        let points: Vec<Point> = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
            .iter()
            .map(|&c| Point::from(c))
            .collect();
        let report = ParcelReport::build(&points, &SurveyOptions::default()).unwrap();
        let table = format_table(&report, 2);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Beacon"));
        assert!(lines[2].starts_with("P1"));
        assert!(lines[2].ends_with(" -"));
        assert!(lines[3].contains("090°00'00\""));
        assert!(lines[5].starts_with("P4"));
        assert!(table.contains("Area:      100.00 m²"));
        assert!(table.contains("Perimeter: 40.00 m"));
    }
}
