// Domain layer: models and ports (interfaces). Nothing here touches SQLite or the terminal.

pub mod model;
pub mod ports;
