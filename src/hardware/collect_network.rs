use crate::error::CollectError;
use crate::hardware::sources::InterfaceSource;
use crate::hardware::types::{Section, SectionKind};

/// Entry point: every human-meaningful address, in enumeration order.
pub fn collect_network_info(source: &dyn InterfaceSource) -> Result<Section, CollectError> {
    let addresses = source.addresses()?;

    let mut section = Section::new(SectionKind::Network);
    section.push("Network Interfaces and IPs:");

    for addr in addresses.iter().filter(|a| !a.family.is_link_layer()) {
        section.push(format!("  {}: {}", addr.interface, addr.address));
    }

    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::sources::fakes::FakeInterfaces;
    use crate::hardware::types::{AddressFamily, NetworkInterfaceAddress};

    fn addr(interface: &str, family: AddressFamily, address: &str) -> NetworkInterfaceAddress {
        NetworkInterfaceAddress {
            interface: interface.to_string(),
            family,
            address: address.to_string(),
        }
    }

    #[test]
    fn test_link_layer_addresses_skipped_and_order_kept() {
        let source = FakeInterfaces(vec![
            addr("wlp2s0", AddressFamily::Link, "a4:c3:f0:11:22:33"),
            addr("wlp2s0", AddressFamily::Inet, "10.0.0.12"),
            addr("lo", AddressFamily::Inet, "127.0.0.1"),
            addr("enp3s0", AddressFamily::Packet, "00:00:00:00:00:00"),
            addr("wlp2s0", AddressFamily::Inet6, "fe80::1"),
        ]);
        let section = collect_network_info(&source).unwrap();

        assert_eq!(
            section.lines,
            vec![
                "Network Interfaces and IPs:",
                "  wlp2s0: 10.0.0.12",
                "  lo: 127.0.0.1",
                "  wlp2s0: fe80::1",
            ]
        );
    }

    #[test]
    fn test_no_addresses_keeps_heading() {
        let section = collect_network_info(&FakeInterfaces(Vec::new())).unwrap();
        assert_eq!(section.lines, vec!["Network Interfaces and IPs:"]);
    }
}
