use std::process::Command;

use serde_json::Value;
use tracing::debug;

use crate::error::CollectError;
use crate::hardware::sources::InterfaceSource;
use crate::hardware::types::{AddressFamily, NetworkInterfaceAddress};

/// Interface addresses from `ip -j addr`, which keeps the kernel's ordering.
pub struct IpRouteSource;

impl InterfaceSource for IpRouteSource {
    fn addresses(&self) -> Result<Vec<NetworkInterfaceAddress>, CollectError> {
        let output = Command::new("ip")
            .args(["-j", "addr"])
            .output()
            .map_err(|e| CollectError::query("ip addr", e))?;

        if !output.status.success() {
            return Err(CollectError::query(
                "ip addr",
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        parse_ip_addr_json(&output.stdout)
    }
}

pub fn parse_ip_addr_json(raw: &[u8]) -> Result<Vec<NetworkInterfaceAddress>, CollectError> {
    let json: Value = serde_json::from_slice(raw).map_err(|e| CollectError::query("ip addr", e))?;
    let ifaces = json
        .as_array()
        .ok_or_else(|| CollectError::query("ip addr", "expected a JSON array"))?;

    let mut addresses = Vec::new();

    for iface in ifaces {
        let ifname = match iface.get("ifname").and_then(|v| v.as_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        // Hardware address first, mirroring how the kernel lists it.
        if let Some(mac) = iface.get("address").and_then(|v| v.as_str()) {
            addresses.push(NetworkInterfaceAddress {
                interface: ifname.clone(),
                family: AddressFamily::Link,
                address: mac.to_string(),
            });
        }

        let addr_info = match iface.get("addr_info").and_then(|v| v.as_array()) {
            Some(a) => a,
            None => continue,
        };

        for addr in addr_info {
            let family = addr.get("family").and_then(|v| v.as_str()).unwrap_or("");
            let local = addr.get("local").and_then(|v| v.as_str()).unwrap_or("");
            if local.is_empty() {
                continue;
            }

            let family = match family {
                "inet" => AddressFamily::Inet,
                "inet6" => AddressFamily::Inet6,
                "link" => AddressFamily::Link,
                "packet" => AddressFamily::Packet,
                other => {
                    debug!(interface = %ifname, family = other, "skipping unknown address family");
                    continue;
                }
            };

            addresses.push(NetworkInterfaceAddress {
                interface: ifname.clone(),
                family,
                address: local.to_string(),
            });
        }
    }

    Ok(addresses)
}
