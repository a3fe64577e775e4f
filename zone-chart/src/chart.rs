use crate::zone::Zone;

pub const X_AXIS_TITLE: &str = "Zone";
pub const Y_AXIS_TITLE: &str = "Heart Rate (bpm)";

/// Everything needed to draw the zone bar chart of one activity.
///
/// Categories and values keep the order the zones were stored in.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

impl ZoneChart {
    pub fn from_zones(activity_id: &str, zones: &[Zone]) -> Self {
        let (categories, values) = zones
            .iter()
            .map(|z| (format!("Zone {}", z.name), z.min))
            .unzip();

        ZoneChart {
            title: format!("Heart Rate Zones for Activity {}", activity_id),
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
            categories,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::decode_zones;

    #[test]
    fn labels_and_values_follow_stored_order() {
        let zones =
            decode_zones("1", r#"[{"name":"1","min":100},{"name":"2","min":130}]"#).expect("zones");
        let chart = ZoneChart::from_zones("1", &zones);
        assert_eq!(chart.categories, vec!["Zone 1", "Zone 2"]);
        assert_eq!(chart.values, vec![100.0, 130.0]);
    }

    #[test]
    fn unsorted_zones_are_not_resorted() {
        let zones = decode_zones(
            "1",
            r#"[{"name":"3","min":160},{"name":"1","min":100},{"name":"2","min":130}]"#,
        )
        .expect("zones");
        let chart = ZoneChart::from_zones("1", &zones);
        assert_eq!(chart.categories, vec!["Zone 3", "Zone 1", "Zone 2"]);
        assert_eq!(chart.values, vec![160.0, 100.0, 130.0]);
    }

    #[test]
    fn titles_name_the_activity() {
        let chart = ZoneChart::from_zones("999", &[]);
        assert_eq!(chart.title, "Heart Rate Zones for Activity 999");
        assert_eq!(chart.x_title, "Zone");
        assert_eq!(chart.y_title, "Heart Rate (bpm)");
        assert!(chart.categories.is_empty());
    }

    #[test]
    fn same_input_builds_same_chart() {
        let zones = decode_zones("9", r#"[{"name":"A","min":90},{"name":"B","min":120}]"#)
            .expect("zones");
        assert_eq!(
            ZoneChart::from_zones("9", &zones),
            ZoneChart::from_zones("9", &zones)
        );
    }
}
