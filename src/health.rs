use crate::day::DayKey;

/// Point-in-time view of the bot's state, computed on request
#[derive(serde::Serialize)]
pub struct Health {
    pub status: &'static str,
    pub guilds: usize,
    pub channel_id: u64,
    pub day: String,
}

impl Health {
    pub fn snapshot(guilds: usize, channel_id: u64, day: DayKey) -> Self {
        Self {
            status: "ok",
            guilds,
            channel_id,
            day: day.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_as_json() {
        let health = Health::snapshot(2, 1234, "2024-01-02".parse().unwrap());
        assert_eq!(
            serde_json::to_value(&health).unwrap(),
            serde_json::json!({
                "status": "ok",
                "guilds": 2,
                "channel_id": 1234,
                "day": "2024-01-02",
            })
        );
    }
}
