use anyhow::{Result, anyhow};
use ipnet::IpNet;
use std::net::IpAddr;

/// Parse a comma-separated allow-list. Entries are CIDR networks; a bare
/// address is treated as a single-host network.
pub fn parse_networks(list: &str) -> Result<Vec<IpNet>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if let Ok(network) = s.parse::<IpNet>() {
                return Ok(network);
            }
            let ip: IpAddr = s
                .parse()
                .map_err(|_| anyhow!("invalid network or address: {}", s))?;
            Ok(IpNet::from(ip))
        })
        .collect()
}

pub fn is_permitted(ip: IpAddr, networks: &[IpNet]) -> bool {
    networks.iter().any(|network| network.contains(&ip))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn loopback_only_default() {
        let networks = parse_networks("127.0.0.1/32").unwrap();
        assert!(is_permitted(ip("127.0.0.1"), &networks));
        assert!(!is_permitted(ip("192.168.1.10"), &networks));
        assert!(!is_permitted(ip("127.0.0.2"), &networks));
    }

    #[test]
    fn cidr_range_membership() {
        let networks = parse_networks("10.1.0.0/16").unwrap();
        assert!(is_permitted(ip("10.1.200.3"), &networks));
        assert!(!is_permitted(ip("10.2.0.1"), &networks));
    }

    #[test]
    fn multiple_ranges_and_bare_addresses() {
        let networks = parse_networks("127.0.0.1/32, 10.0.0.0/8,192.168.5.77").unwrap();
        assert!(is_permitted(ip("10.99.0.1"), &networks));
        assert!(is_permitted(ip("192.168.5.77"), &networks));
        assert!(!is_permitted(ip("192.168.5.78"), &networks));
    }

    #[test]
    fn invalid_entry_is_an_error() {
        assert!(parse_networks("not-a-network").is_err());
        assert!(parse_networks("10.0.0.0/8,bogus").is_err());
    }

    #[test]
    fn empty_list_permits_nothing() {
        let networks = parse_networks("").unwrap();
        assert!(!is_permitted(ip("127.0.0.1"), &networks));
    }
}
