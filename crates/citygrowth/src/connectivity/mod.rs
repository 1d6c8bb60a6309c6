mod engine;
mod networks;
mod plugin;

pub use engine::{ConnectionRecord, ConnectivityEngine};
pub use networks::{
    discover_energy_grids, discover_transport_networks, EnergyGrid, EnergyGridId, NetworkId,
    TransportNetwork,
};
pub use plugin::{recalculate_connectivity, ConnectivityPlugin, ConnectivityTimer};
