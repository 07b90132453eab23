//! Wayland side of the layout generator.
//!
//! [`Controller`] owns the event queue and drives it; [`State`] receives the
//! dispatched events one at a time and routes layout events to the
//! [`Output`](crate::output::Output) they belong to.

use tarn_protocol::river_layout_manager_v3::RiverLayoutManagerV3;
use tarn_protocol::river_layout_v3::{self, RiverLayoutV3};
use wayland_client::protocol::wl_output::WlOutput;
use wayland_client::protocol::wl_registry::{self, WlRegistry};
use wayland_client::{
    delegate_noop, ConnectError, Connection, Dispatch, DispatchError, EventQueue, Proxy,
    QueueHandle,
};

use crate::config::Config;
use crate::dwindle::Rect;
use crate::output::{LayoutEvent, LayoutSink, OutputName, Outputs, Release, SessionError};
use crate::NAMESPACE;

const LAYOUT_MANAGER_VERSION: u32 = 2;
const OUTPUT_VERSION: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("failed to connect to a Wayland compositor (is WAYLAND_DISPLAY set?)")]
    Connect(#[from] ConnectError),
    #[error("compositor does not advertise river_layout_manager_v3")]
    LayoutManagerMissing,
    #[error("Wayland dispatch failed")]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct State<O = WlOutput, L = RiverLayoutV3> {
    config: Config,
    initialized: bool,
    layout_manager: Option<RiverLayoutManagerV3>,
    outputs: Outputs<O, L>,
    fatal: Option<ControllerError>,
}

impl<O: Release, L: LayoutSink + Release> State<O, L> {
    fn new(config: Config) -> Self {
        Self {
            config,
            initialized: false,
            layout_manager: None,
            outputs: Outputs::new(),
            fatal: None,
        }
    }

    fn remove_global(&mut self, name: u32) {
        if self.outputs.remove(name) {
            tracing::info!("output {} removed", name);
        }
    }

    /// Hand a layout event to the output it was sent to. Once something
    /// fatal happened, the rest of the batch is dropped.
    fn route(&mut self, name: OutputName, event: LayoutEvent) {
        if self.fatal.is_some() {
            return;
        }
        let Some(output) = self.outputs.get_mut(name) else {
            tracing::debug!("event for removed output {}: {:?}", name, event);
            return;
        };

        if let Err(e) = output.handle_event(event, &self.config) {
            self.fail(e.into());
        }
    }

    fn fail(&mut self, error: ControllerError) {
        tracing::error!("{}", error);
        self.fatal.get_or_insert(error);
    }
}

impl State {
    fn add_output(&mut self, name: OutputName, handle: WlOutput, qh: &QueueHandle<Self>) {
        self.outputs.insert(name, handle, &self.config);
        tracing::info!("output {} added", name);

        if self.initialized {
            self.activate_outputs(qh);
        }
    }

    fn activate_outputs(&mut self, qh: &QueueHandle<Self>) {
        let Some(manager) = &self.layout_manager else {
            return;
        };

        self.outputs.activate_all(|output| {
            tracing::info!("output {}: registering layout '{}'", output.name(), NAMESPACE);
            manager.get_layout(output.handle(), NAMESPACE.to_string(), qh, output.name())
        });
    }
}

pub struct Controller {
    queue: EventQueue<State>,
    state: State,
    _registry: WlRegistry,
}

impl Controller {
    pub fn connect(config: Config) -> Result<Self, ControllerError> {
        let connection = Connection::connect_to_env()?;
        let queue = connection.new_event_queue();
        let registry = connection.display().get_registry(&queue.handle(), ());

        tracing::info!("connected to Wayland compositor");

        Ok(Self {
            queue,
            state: State::new(config),
            _registry: registry,
        })
    }

    /// Wait for the initial burst of globals and make sure the compositor
    /// speaks the layout protocol.
    pub fn discover(&mut self) -> Result<(), ControllerError> {
        self.queue.roundtrip(&mut self.state)?;
        self.state.initialized = true;
        self.check_fatal()?;

        if self.state.layout_manager.is_none() {
            return Err(ControllerError::LayoutManagerMissing);
        }

        tracing::info!("discovered {} outputs", self.state.outputs.len());
        Ok(())
    }

    pub fn activate_outputs(&mut self) {
        let qh = self.queue.handle();
        self.state.activate_outputs(&qh);
    }

    /// Dispatch events until something fatal happens.
    pub fn run(&mut self) -> Result<(), ControllerError> {
        loop {
            self.queue.blocking_dispatch(&mut self.state)?;
            self.check_fatal()?;
        }
    }

    fn check_fatal(&mut self) -> Result<(), ControllerError> {
        match self.state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Dispatch<WlRegistry, ()> for State {
    fn event(
        state: &mut Self,
        registry: &WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if state.fatal.is_some() {
            return;
        }

        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => {
                if interface == RiverLayoutManagerV3::interface().name {
                    let manager = registry.bind::<RiverLayoutManagerV3, _, _>(
                        name,
                        version.min(LAYOUT_MANAGER_VERSION),
                        qh,
                        (),
                    );
                    tracing::debug!("bound {} v{}", interface, manager.version());
                    state.layout_manager = Some(manager);
                } else if interface == WlOutput::interface().name {
                    let output =
                        registry.bind::<WlOutput, _, _>(name, version.min(OUTPUT_VERSION), qh, ());
                    state.add_output(name, output, qh);
                }
            }
            wl_registry::Event::GlobalRemove { name } => state.remove_global(name),
            _ => {}
        }
    }
}

impl Dispatch<RiverLayoutV3, OutputName> for State {
    fn event(
        state: &mut Self,
        _: &RiverLayoutV3,
        event: river_layout_v3::Event,
        name: &OutputName,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let Some(event) = layout_event(event) {
            state.route(*name, event);
        }
    }
}

delegate_noop!(State: ignore WlOutput);
delegate_noop!(State: RiverLayoutManagerV3);

fn layout_event(event: river_layout_v3::Event) -> Option<LayoutEvent> {
    match event {
        river_layout_v3::Event::NamespaceInUse => Some(LayoutEvent::NamespaceInUse),
        river_layout_v3::Event::LayoutDemand {
            view_count,
            usable_width,
            usable_height,
            tags,
            serial,
        } => Some(LayoutEvent::LayoutDemand {
            view_count,
            usable_width,
            usable_height,
            tags,
            serial,
        }),
        river_layout_v3::Event::UserCommand { command } => {
            Some(LayoutEvent::UserCommand { command })
        }
        river_layout_v3::Event::UserCommandTags { tags } => {
            Some(LayoutEvent::UserCommandTags { tags })
        }
        _ => None,
    }
}

impl Release for WlOutput {
    fn release(&self) {
        // wl_output.release only exists since version 3
        if self.version() >= 3 {
            WlOutput::release(self);
        }
    }
}

impl Release for RiverLayoutV3 {
    fn release(&self) {
        self.destroy();
    }
}

impl LayoutSink for RiverLayoutV3 {
    fn push_view_dimensions(&self, rect: Rect, serial: u32) {
        RiverLayoutV3::push_view_dimensions(self, rect.x, rect.y, rect.width, rect.height, serial);
    }

    fn commit(&self, layout_name: &str, serial: u32) {
        RiverLayoutV3::commit(self, layout_name.to_string(), serial);
    }
}
