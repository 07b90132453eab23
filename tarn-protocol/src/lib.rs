//! Client-side bindings for the `river_layout_v3` layout generator protocol.
//!
//! The code is generated from `protocols/river-layout-v3.xml` at compile time.

pub mod layout_v3 {
    #![allow(missing_docs, clippy::all)]

    use wayland_client;
    use wayland_client::protocol::*;

    pub mod __interfaces {
        use wayland_client::backend as wayland_backend;
        use wayland_client::protocol::__interfaces::*;
        wayland_scanner::generate_interfaces!("protocols/river-layout-v3.xml");
    }
    use self::__interfaces::*;

    wayland_scanner::generate_client_code!("protocols/river-layout-v3.xml");
}

pub use layout_v3::{river_layout_manager_v3, river_layout_v3};
