use std::net::Ipv4Addr;

use crate::error::StartupError;

/// Expands a CIDR block into its usable host addresses in address order,
/// excluding the network and broadcast addresses (first and last of the
/// block). `/31` and `/32` blocks therefore enumerate to nothing.
pub fn cidr_hosts(cidr: &str) -> Result<Vec<Ipv4Addr>, StartupError> {
    // ipnetwork accepts a bare address as /32; CIDR mode requires the prefix.
    if !cidr.contains('/') {
        return Err(StartupError::InvalidCidr(cidr.to_string()));
    }
    let network: ipnetwork::Ipv4Network = cidr
        .parse()
        .map_err(|_| StartupError::InvalidCidr(cidr.to_string()))?;

    let start: u32 = network.network().into();
    let end: u32 = network.broadcast().into();
    if end - start < 2 {
        return Ok(Vec::new());
    }

    Ok(((start + 1)..end).map(Ipv4Addr::from).collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_30_yields_exactly_two_hosts() {
        let hosts = cidr_hosts("10.0.0.0/30").unwrap();
        assert_eq!(
            hosts,
            vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]
        );
    }

    #[test]
    fn slash_24_excludes_network_and_broadcast() {
        let hosts = cidr_hosts("192.168.1.0/24").unwrap();
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts[0], Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(hosts[253], Ipv4Addr::new(192, 168, 1, 254));
    }

    #[test]
    fn host_bits_are_masked_away() {
        let hosts = cidr_hosts("192.168.1.37/24").unwrap();
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts[0], Ipv4Addr::new(192, 168, 1, 1));
    }

    #[test]
    fn tiny_blocks_enumerate_to_nothing() {
        assert!(cidr_hosts("10.0.0.1/32").unwrap().is_empty());
        assert!(cidr_hosts("10.0.0.0/31").unwrap().is_empty());
    }

    #[test]
    fn malformed_input_is_fatal() {
        assert!(matches!(
            cidr_hosts("not-a-cidr"),
            Err(StartupError::InvalidCidr(_))
        ));
        assert!(matches!(
            cidr_hosts("10.0.0.0/33"),
            Err(StartupError::InvalidCidr(_))
        ));
        assert!(matches!(
            cidr_hosts("10.0.0.0"),
            Err(StartupError::InvalidCidr(_))
        ));
    }
}
