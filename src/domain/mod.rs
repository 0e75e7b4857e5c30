// Domain layer: payload and command models plus the ports the uploader drives.

pub mod model;
pub mod ports;
