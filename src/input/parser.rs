use crate::domain::Point;
use crate::error::{ParcelError, ParcelResult};

/// Parse beacon coordinates, one `easting,northing` pair per line
///
/// # Format
/// - Fields may be separated by commas, semicolons, tabs or spaces
/// - Blank lines and `#` comments are skipped
/// - The first non-blank line may be a header (no numeric fields)
pub fn parse_points(text: &str) -> ParcelResult<Vec<Point>> {
    let mut points = Vec::new();
    let mut seen_data = false;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if !seen_data && is_header(line) {
            seen_data = true;
            continue;
        }
        seen_data = true;

        points.push(parse_pair(line, line_no)?);
    }

    Ok(points)
}

/// Parse a single `easting,northing` pair; `line` is used for error reporting
pub fn parse_pair(text: &str, line: usize) -> ParcelResult<Point> {
    let fields = split_fields(text);

    if fields.len() != 2 {
        return Err(ParcelError::malformed(
            line,
            format!("expected easting and northing, found {} values", fields.len()),
        ));
    }

    let easting = parse_coordinate(fields[0], "easting", line)?;
    let northing = parse_coordinate(fields[1], "northing", line)?;

    Ok(Point::new(easting, northing))
}

fn split_fields(text: &str) -> Vec<&str> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect()
}

fn parse_coordinate(field: &str, name: &str, line: usize) -> ParcelResult<f64> {
    let value: f64 = field
        .parse()
        .map_err(|_| ParcelError::malformed(line, format!("{} {:?} is not a number", name, field)))?;

    if !value.is_finite() {
        return Err(ParcelError::malformed(
            line,
            format!("{} {:?} is not finite", name, field),
        ));
    }

    Ok(value)
}

fn is_header(line: &str) -> bool {
    split_fields(line).iter().all(|f| f.parse::<f64>().is_err())
}
