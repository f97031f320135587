use anyhow::{anyhow, Result};
use serenity::all::ChannelId;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/sheetbot/config.toml";
const DATA_FILE_NAME: &str = "submissions_data.json";

/// Bot configuration
#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub attendance: Tracking,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct General {
    pub discord_token: String,
    pub command_prefix: String,
    /// Channel watched for submissions and where report commands are answered
    pub channel_id: u64,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tracking {
    pub data_path: PathBuf,
    pub heartbeat_seconds: u64,
    /// Count submissions posted in any channel, not just `general.channel_id`
    pub watch_all_channels: bool,
    /// Post a diagnostic message to the target channel once connected
    pub announce_online: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            command_prefix: "!".to_owned(),
            channel_id: 0,
        }
    }
}

impl Default for Tracking {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_FILE_NAME),
            heartbeat_seconds: 30,
            watch_all_channels: false,
            announce_online: true,
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os("SHEETBOT_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = match tokio::fs::File::open(&path).await {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents).await.map_err(|e| {
                    anyhow!(
                        "Could not read configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?;

                toml::from_str(&contents).map_err(|e| {
                    anyhow!(
                        "Could not parse configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?
            }
            // Everything can come from the environment instead
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(anyhow!(
                    "Could not open configuration at `{}`: {}",
                    path.to_string_lossy(),
                    e
                ))
            }
        };

        config.apply_env(|key| std::env::var(key).ok());

        if config.general.discord_token.is_empty() {
            return Err(anyhow!(
                "No Discord token.  Set DISCORD_TOKEN or `general.discord_token` in `{}`",
                path.to_string_lossy()
            ));
        }

        Ok(config)
    }

    /// Environment variables win over the file
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(token) = var("DISCORD_TOKEN") {
            self.general.discord_token = token;
        }
        if let Some(raw) = var("CHANNEL_ID") {
            self.general.channel_id = parse_channel_id(&raw);
        }
        if let Some(dir) = var("DATA_DIR") {
            self.attendance.data_path = PathBuf::from(dir).join(DATA_FILE_NAME);
        }
    }
}

impl Config {
    /// Commands are answered only in the target channel, and nowhere while it is unset
    pub fn answers_in(&self, channel_id: ChannelId) -> bool {
        self.general.target_channel() == Some(channel_id)
    }

    /// Whether messages in `channel_id` are checked for submissions.  Nothing is watched while
    /// the target channel is unset, even with `watch_all_channels`.
    pub fn watches(&self, channel_id: ChannelId) -> bool {
        match self.general.target_channel() {
            Some(target) => self.attendance.watch_all_channels || target == channel_id,
            None => false,
        }
    }
}

impl General {
    /// `None` while `channel_id` is unset
    pub fn target_channel(&self) -> Option<ChannelId> {
        (self.channel_id != 0).then(|| ChannelId::new(self.channel_id))
    }
}

/// Anything but a plain run of digits is treated as unset
fn parse_channel_id(raw: &str) -> u64 {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            discord_token = "abc"
            channel_id = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.general.discord_token, "abc");
        assert_eq!(config.general.channel_id, 42);
        assert_eq!(config.general.command_prefix, "!");
        assert_eq!(config.attendance.heartbeat_seconds, 30);
        assert_eq!(config.attendance.data_path, PathBuf::from(DATA_FILE_NAME));
        assert!(!config.attendance.watch_all_channels);
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("DISCORD_TOKEN", "from-env"),
            ("CHANNEL_ID", "987"),
            ("DATA_DIR", "/data"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.general.discord_token = "from-file".to_owned();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.general.discord_token, "from-env");
        assert_eq!(config.general.channel_id, 987);
        assert_eq!(
            config.attendance.data_path,
            PathBuf::from("/data/submissions_data.json")
        );
    }

    fn targeting(channel_id: u64, watch_all_channels: bool) -> Config {
        let mut config = Config::default();
        config.general.channel_id = channel_id;
        config.attendance.watch_all_channels = watch_all_channels;
        config
    }

    #[test]
    fn commands_only_in_target_channel() {
        let config = targeting(10, true);
        assert!(config.answers_in(ChannelId::new(10)));
        assert!(!config.answers_in(ChannelId::new(11)));
    }

    #[test]
    fn watches_target_channel_only_by_default() {
        let config = targeting(10, false);
        assert!(config.watches(ChannelId::new(10)));
        assert!(!config.watches(ChannelId::new(11)));
    }

    #[test]
    fn watch_all_channels_extends_detection() {
        let config = targeting(10, true);
        assert!(config.watches(ChannelId::new(10)));
        assert!(config.watches(ChannelId::new(11)));
    }

    #[test]
    fn unset_channel_disables_everything() {
        for watch_all in [false, true] {
            let config = targeting(0, watch_all);
            assert_eq!(config.general.target_channel(), None);
            assert!(!config.answers_in(ChannelId::new(10)));
            assert!(!config.watches(ChannelId::new(10)));
        }
    }

    #[test]
    fn non_numeric_channel_id_is_unset() {
        assert_eq!(parse_channel_id("123"), 123);
        assert_eq!(parse_channel_id("12a"), 0);
        assert_eq!(parse_channel_id("-5"), 0);
        assert_eq!(parse_channel_id(""), 0);
    }
}
