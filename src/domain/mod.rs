// Domain layer: loadout models and the ports the translator and writer talk through.

pub mod model;
pub mod ports;
