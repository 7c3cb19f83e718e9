// Hardware report collection modules
pub mod types;
pub mod sources;
pub mod platform;
pub mod collect_system;
pub mod collect_cpu;
pub mod collect_fan;
pub mod collect_memory;
pub mod collect_storage;
pub mod collect_network;
pub mod collect_battery;
pub mod collect_gpus;
pub mod collect_motherboard;
pub mod collector;

// Re-export main collection functions
pub use collect_system::collect_system_info;
pub use collect_cpu::{collect_cpu_info, SAMPLE_WINDOW};
pub use collect_fan::collect_cpu_fan_info;
pub use collect_memory::collect_memory_info;
pub use collect_storage::collect_disks;
pub use collect_network::collect_network_info;
pub use collect_battery::collect_battery_info;
pub use collect_gpus::collect_gpus;
pub use collect_motherboard::collect_motherboard_info;
pub use collector::{collect_full_report, collect_section};
pub use platform::detect_capabilities;
