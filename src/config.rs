use crate::utils::network;
use dotenvy::dotenv;
use ipnet::IpNet;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    /// Networks check-ins may come from. Defaults to loopback only.
    pub attendance_networks: Vec<IpNet>,

    // First-boot admin seed
    pub admin_email: String,
    pub admin_password: String,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_protected_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "86400".to_string()) // default 24h
                .parse()
                .unwrap(),

            attendance_networks: network::parse_networks(
                &env::var("ATTENDANCE_NETWORKS").unwrap_or_else(|_| "127.0.0.1/32".to_string()),
            )
            .expect("ATTENDANCE_NETWORKS must be a comma-separated list of CIDR networks"),

            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@school.com".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string()),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_register_per_min: env::var("RATE_REGISTER_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),
        }
    }
}
