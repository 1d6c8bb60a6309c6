use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod config;
pub mod connectivity;
pub mod game_params;
pub mod grid;
pub mod identity;
pub mod notifications;
pub mod placement;
pub mod ports;
pub mod sim_rng;
pub mod simulation_sets;
pub mod stats;
pub mod structures;
pub mod traffic;
pub mod zones;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Persistence hooks
// ---------------------------------------------------------------------------

/// A resource an external save system can persist under a stable key.
///
/// Each implementor owns its encoding. Plugins register their resources with
/// the [`SaveableRegistry`] in `build()`.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Unique key for this resource in the save file's extension map.
    /// Must be stable across versions (used for deserialization lookup).
    const SAVE_KEY: &'static str;

    /// Serialize this resource to bytes.
    /// Return `None` to skip saving (e.g. when the resource is at its default state).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Deserialize from bytes, returning the restored resource.
    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode bytes via `bitcode::decode`, logging a warning and returning `Default` on failure.
/// Use this in `Saveable::load_from_bytes` implementations to surface decode errors.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, falling back to default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

/// Type alias for the save function stored in a `SaveableEntry`.
pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
/// Type alias for the load function stored in a `SaveableEntry`.
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
/// Type alias for the reset function stored in a `SaveableEntry`.
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased save/load/reset operations for a single registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Every saveable resource, populated during plugin setup.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a resource type that implements `Saveable`.
    ///
    /// Panics in debug builds if a resource with the same `SAVE_KEY` is already
    /// registered, preventing silent data loss from duplicate registrations.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!(
                "SaveableRegistry: duplicate key '{}', ignoring second registration",
                key
            );
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                let value = T::load_from_bytes(bytes);
                world.insert_resource(value);
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    /// Encode every registered resource that has something to save.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Load registered resources from an extension map. Resources whose key
    /// is absent keep their current value.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    /// Reset all registered resources to their defaults.
    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Fixed ticks elapsed since the app started.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Connectivity, zone growth and everything that reads them, on `FixedUpdate`.
///
/// The embedding app owns the `WorldGrid`; edits made through
/// `WorldGrid::place_structure` / `demolish` are picked up on the next tick.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<TickCounter>()
            .init_resource::<grid::WorldGrid>()
            .add_systems(
                FixedUpdate,
                advance_tick_counter
                    .before(zones::sync_zone_registry)
                    .in_set(SimulationSet::PreSim),
            );

        app.add_plugins((
            sim_rng::SimRngPlugin::default(),
            game_params::GameParamsPlugin,
            connectivity::ConnectivityPlugin,
            zones::ZonesPlugin,
            ports::PortsPlugin,
            stats::StatsPlugin,
            traffic::TrafficPlugin,
            notifications::NotificationsPlugin,
        ));
    }
}

#[cfg(test)]
mod saveable_tests {
    use super::*;

    #[derive(Resource, Default, Debug, PartialEq)]
    struct Counter {
        value: u32,
    }

    impl Saveable for Counter {
        const SAVE_KEY: &'static str = "counter";

        fn save_to_bytes(&self) -> Option<Vec<u8>> {
            (self.value != 0).then(|| bitcode::encode(&self.value))
        }

        fn load_from_bytes(bytes: &[u8]) -> Self {
            Counter {
                value: decode_or_warn(Self::SAVE_KEY, bytes),
            }
        }
    }

    #[test]
    fn test_save_skips_default_and_loads_back() {
        let mut world = World::new();
        world.insert_resource(Counter { value: 0 });
        let mut registry = SaveableRegistry::default();
        registry.register::<Counter>();
        assert!(registry.save_all(&world).is_empty());

        world.insert_resource(Counter { value: 42 });
        let extensions = registry.save_all(&world);
        assert_eq!(extensions.len(), 1);

        registry.reset_all(&mut world);
        assert_eq!(world.resource::<Counter>().value, 0);
        registry.load_all(&mut world, &extensions);
        assert_eq!(world.resource::<Counter>().value, 42);
    }

    #[test]
    fn test_load_ignores_absent_keys() {
        let mut world = World::new();
        world.insert_resource(Counter { value: 7 });
        let mut registry = SaveableRegistry::default();
        registry.register::<Counter>();
        registry.load_all(&mut world, &BTreeMap::new());
        assert_eq!(world.resource::<Counter>().value, 7);
    }

    #[test]
    fn test_undecodable_bytes_fall_back_to_default() {
        let value: u64 = decode_or_warn("broken", &[]);
        assert_eq!(value, 0);
    }

    #[test]
    fn test_simulation_registers_its_resources() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin);
        let registry = app.world().resource::<SaveableRegistry>();
        let keys: Vec<&str> = registry.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["sim_rng", "game_params", "zone_registry", "zone_demand"]
        );

        // Empty registry and neutral demand are skipped.
        let saved = registry.save_all(app.world());
        assert!(saved.contains_key("sim_rng"));
        assert!(saved.contains_key("game_params"));
        assert!(!saved.contains_key("zone_registry"));
        assert!(!saved.contains_key("zone_demand"));
    }
}
