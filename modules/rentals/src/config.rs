use std::env;

use chrono_tz::Tz;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// IANA zone used to derive "today" for reading dates
    pub time_zone: Tz,
    /// Recipient of reading-submitted notifications
    pub admin_email: String,
    pub from_email: String,
    /// HTTP mail gateway; absent means the in-memory mailer (dev/test)
    pub mail_gateway_url: Option<String>,
    /// S3-compatible bucket for bill attachments; absent means in-memory
    pub blob_bucket: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let host = env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8094".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid u16".to_string())?;

        let time_zone: Tz = env::var("APP_TIME_ZONE")
            .unwrap_or_else(|_| "Europe/Bucharest".to_string())
            .parse()
            .map_err(|_| "APP_TIME_ZONE must be a valid IANA zone name".to_string())?;

        let admin_email = env::var("ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@rentmanager.local".to_string());

        let from_email = env::var("FROM_EMAIL")
            .unwrap_or_else(|_| "noreply@rentmanager.local".to_string());

        let mail_gateway_url = env::var("MAIL_GATEWAY_URL").ok();
        let blob_bucket = env::var("BLOB_BUCKET").ok();

        Ok(Config {
            database_url,
            host,
            port,
            time_zone,
            admin_email,
            from_email,
            mail_gateway_url,
            blob_bucket,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zone_is_bucharest() {
        let tz: Tz = "Europe/Bucharest".parse().unwrap();
        assert_eq!(tz.name(), "Europe/Bucharest");
    }
}
