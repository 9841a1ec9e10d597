//! CPCB sub-index calculation from raw pollutant concentrations.

/// One breakpoint segment: concentration range mapped to an AQI range.
type Segment = (f64, f64, f64, f64);

/// CPCB breakpoint table per pollutant. Concentrations are in µg/m³ except
/// CO, which the standard specifies in mg/m³. The last segment of each table
/// is open-ended so extreme readings still classify.
fn breakpoints(pollutant: &str) -> Option<&'static [Segment]> {
    const PM10: &[Segment] = &[
        (0.0, 50.0, 0.0, 50.0),
        (51.0, 100.0, 51.0, 100.0),
        (101.0, 250.0, 101.0, 200.0),
        (251.0, 350.0, 201.0, 300.0),
        (351.0, 430.0, 301.0, 400.0),
        (431.0, f64::INFINITY, 401.0, 500.0),
    ];
    const PM25: &[Segment] = &[
        (0.0, 30.0, 0.0, 50.0),
        (31.0, 60.0, 51.0, 100.0),
        (61.0, 90.0, 101.0, 200.0),
        (91.0, 120.0, 201.0, 300.0),
        (121.0, 250.0, 301.0, 400.0),
        (251.0, f64::INFINITY, 401.0, 500.0),
    ];
    const NO2: &[Segment] = &[
        (0.0, 40.0, 0.0, 50.0),
        (41.0, 80.0, 51.0, 100.0),
        (81.0, 180.0, 101.0, 200.0),
        (181.0, 280.0, 201.0, 300.0),
        (281.0, 400.0, 301.0, 400.0),
        (401.0, f64::INFINITY, 401.0, 500.0),
    ];
    const O3: &[Segment] = &[
        (0.0, 50.0, 0.0, 50.0),
        (51.0, 100.0, 51.0, 100.0),
        (101.0, 168.0, 101.0, 200.0),
        (169.0, 208.0, 201.0, 300.0),
        (209.0, 748.0, 301.0, 400.0),
        (749.0, f64::INFINITY, 401.0, 500.0),
    ];
    const CO: &[Segment] = &[
        (0.0, 1.0, 0.0, 50.0),
        (1.1, 2.0, 51.0, 100.0),
        (2.1, 10.0, 101.0, 200.0),
        (10.1, 17.0, 201.0, 300.0),
        (17.1, 34.0, 301.0, 400.0),
        (34.1, f64::INFINITY, 401.0, 500.0),
    ];
    const SO2: &[Segment] = &[
        (0.0, 40.0, 0.0, 50.0),
        (41.0, 80.0, 51.0, 100.0),
        (81.0, 380.0, 101.0, 200.0),
        (381.0, 800.0, 201.0, 300.0),
        (801.0, 1600.0, 301.0, 400.0),
        (1601.0, f64::INFINITY, 401.0, 500.0),
    ];
    const NH3: &[Segment] = &[
        (0.0, 200.0, 0.0, 50.0),
        (201.0, 400.0, 51.0, 100.0),
        (401.0, 800.0, 101.0, 200.0),
        (801.0, 1200.0, 201.0, 300.0),
        (1201.0, 1800.0, 301.0, 400.0),
        (1801.0, f64::INFINITY, 401.0, 500.0),
    ];

    match pollutant.to_ascii_lowercase().as_str() {
        "pm10" => Some(PM10),
        "pm25" => Some(PM25),
        "no2" => Some(NO2),
        "o3" => Some(O3),
        "co" => Some(CO),
        "so2" => Some(SO2),
        "nh3" => Some(NH3),
        _ => None,
    }
}

fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Sub-index for one pollutant concentration by linear interpolation within
/// its breakpoint segment, rounded half-up.
///
/// Returns `None` for pollutants without a CPCB table, negative values, and
/// NaN.
#[must_use]
pub fn sub_index(value: f64, pollutant: &str) -> Option<i64> {
    if value.is_nan() || value < 0.0 {
        return None;
    }
    let segments = breakpoints(pollutant)?;
    let (c_low, c_high, i_low, i_high) = *segments
        .iter()
        .find(|(low, high, _, _)| value >= *low && value <= *high)?;

    // The top segment's infinite width makes the fraction 0, so every
    // reading beyond the scale lands on that segment's lower index.
    let fraction = (value - c_low) / (c_high - c_low);
    Some(round_half_up(i_low + fraction * (i_high - i_low)))
}

/// Overall AQI: the maximum sub-index across the pollutant panel.
///
/// Pollutants without a table contribute nothing; an empty or entirely
/// untabulated panel yields `None`.
#[must_use]
pub fn overall_aqi<'a, I>(readings: I) -> Option<i64>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    readings
        .into_iter()
        .filter_map(|(pollutant, value)| sub_index(value, pollutant))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(75.0, "pm25", 149)]
    #[case(0.0, "pm25", 0)]
    #[case(30.0, "pm25", 50)]
    #[case(31.0, "pm25", 51)]
    #[case(300.0, "pm25", 401)]
    #[case(64.0, "no2", 80)]
    #[case(50.0, "pm10", 50)]
    #[case(1.5, "co", 73)]
    fn test_sub_index_interpolation(
        #[case] value: f64,
        #[case] pollutant: &str,
        #[case] expected: i64,
    ) {
        assert_eq!(sub_index(value, pollutant), Some(expected));
    }

    #[test]
    fn test_sub_index_is_case_insensitive() {
        assert_eq!(sub_index(75.0, "PM25"), Some(149));
        assert_eq!(sub_index(75.0, "Pm25"), Some(149));
    }

    #[rstest]
    #[case(f64::NAN, "pm25")]
    #[case(-1.0, "pm25")]
    #[case(50.0, "pb")]
    #[case(50.0, "")]
    fn test_sub_index_rejects_unusable_input(#[case] value: f64, #[case] pollutant: &str) {
        assert_eq!(sub_index(value, pollutant), None);
    }

    #[test]
    fn test_readings_beyond_the_scale_land_on_the_top_segment_floor() {
        assert_eq!(sub_index(251.0, "pm25"), Some(401));
        assert_eq!(sub_index(5000.0, "pm25"), Some(401));
        assert_eq!(sub_index(100.0, "co"), Some(401));
    }

    #[test]
    fn test_overall_aqi_takes_the_maximum() {
        let panel = [("pm25", 75.0), ("no2", 64.0)];
        assert_eq!(overall_aqi(panel), Some(149));
    }

    #[test]
    fn test_overall_aqi_skips_untabulated_pollutants() {
        let panel = [("w", 3.0), ("pm25", 75.0)];
        assert_eq!(overall_aqi(panel), Some(149));
        assert_eq!(overall_aqi([("w", 3.0)]), None);
        assert_eq!(overall_aqi([]), None);
    }
}
