use std::collections::HashMap;

use crate::command::{Command, Ratios};
use crate::config::Config;
use crate::dwindle::{self, Rect};
use crate::NAMESPACE;

/// Compositor-assigned global name of an output.
pub type OutputName = u32;

/// A protocol object that must be destroyed when its output goes away.
pub trait Release {
    fn release(&self);
}

/// Outgoing half of a layout object.
pub trait LayoutSink {
    fn push_view_dimensions(&self, rect: Rect, serial: u32);
    fn commit(&self, layout_name: &str, serial: u32);
}

/// Events the compositor sends to a layout object.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    NamespaceInUse,
    LayoutDemand {
        view_count: u32,
        usable_width: u32,
        usable_height: u32,
        tags: u32,
        serial: u32,
    },
    UserCommand {
        command: String,
    },
    UserCommandTags {
        tags: u32,
    },
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("namespace '{namespace}' is already in use on output {output}")]
    NamespaceInUse {
        output: OutputName,
        namespace: &'static str,
    },
}

pub struct Output<O, L> {
    name: OutputName,
    handle: O,
    ratios: Ratios,
    layout: Option<L>,
}

impl<O: Release, L: LayoutSink + Release> Output<O, L> {
    pub fn new(name: OutputName, handle: O, config: &Config) -> Self {
        Self {
            name,
            handle,
            ratios: Ratios::from_config(config),
            layout: None,
        }
    }

    pub fn name(&self) -> OutputName {
        self.name
    }

    pub fn handle(&self) -> &O {
        &self.handle
    }

    pub fn ratios(&self) -> Ratios {
        self.ratios
    }

    pub fn is_active(&self) -> bool {
        self.layout.is_some()
    }

    pub fn attach_layout(&mut self, layout: L) {
        if let Some(old) = self.layout.replace(layout) {
            old.release();
        }
    }

    pub fn handle_event(&mut self, event: LayoutEvent, config: &Config) -> Result<(), SessionError> {
        match event {
            LayoutEvent::NamespaceInUse => Err(SessionError::NamespaceInUse {
                output: self.name,
                namespace: NAMESPACE,
            }),
            LayoutEvent::UserCommand { command } => {
                self.handle_command(&command);
                Ok(())
            }
            LayoutEvent::LayoutDemand {
                view_count,
                usable_width,
                usable_height,
                tags,
                serial,
            } => {
                self.handle_layout_demand(
                    view_count,
                    usable_width,
                    usable_height,
                    tags,
                    serial,
                    config,
                );
                Ok(())
            }
            LayoutEvent::UserCommandTags { tags } => {
                tracing::debug!("output {}: user command for tags {:#x}", self.name, tags);
                Ok(())
            }
        }
    }

    fn handle_command(&mut self, input: &str) {
        match Command::parse(input) {
            Ok(command) => {
                let ratio = command.apply(&mut self.ratios);
                tracing::info!("output {}: {} set to {:.2}", self.name, command.target, ratio);
            }
            Err(e) => {
                tracing::warn!("output {}: ignoring command '{}': {}", self.name, input, e);
            }
        }
    }

    fn handle_layout_demand(
        &self,
        view_count: u32,
        usable_width: u32,
        usable_height: u32,
        tags: u32,
        serial: u32,
        config: &Config,
    ) {
        let Some(layout) = &self.layout else {
            tracing::warn!("output {}: layout demand without a layout object", self.name);
            return;
        };

        let views = dwindle::place(
            usable_width,
            usable_height,
            config.outer_padding,
            config.view_padding,
            view_count,
            self.ratios.horizontal,
            self.ratios.vertical,
        );
        tracing::debug!(
            "output {}: {} views in {}x{} (tags {:#x}, serial {})",
            self.name,
            view_count,
            usable_width,
            usable_height,
            tags,
            serial
        );

        for view in views {
            layout.push_view_dimensions(view, serial);
        }
        layout.commit(NAMESPACE, serial);
    }

    fn destroy(self) {
        if let Some(layout) = &self.layout {
            layout.release();
        }
        self.handle.release();
    }
}

/// All outputs known on the connection, keyed by global name.
pub struct Outputs<O, L> {
    outputs: HashMap<OutputName, Output<O, L>>,
}

impl<O: Release, L: LayoutSink + Release> Outputs<O, L> {
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
        }
    }

    /// Track a newly announced output. Ratios always start from `config`,
    /// even when the compositor reuses a global name.
    pub fn insert(&mut self, name: OutputName, handle: O, config: &Config) -> &mut Output<O, L> {
        if let Some(stale) = self.outputs.remove(&name) {
            tracing::warn!("output {} announced twice, replacing it", name);
            stale.destroy();
        }
        self.outputs
            .entry(name)
            .or_insert_with(|| Output::new(name, handle, config))
    }

    /// Forget an output and release its protocol objects. Returns false when
    /// `name` is not an output, e.g. the removal of some other global.
    pub fn remove(&mut self, name: OutputName) -> bool {
        match self.outputs.remove(&name) {
            Some(output) => {
                output.destroy();
                true
            }
            None => false,
        }
    }

    pub fn get_mut(&mut self, name: OutputName) -> Option<&mut Output<O, L>> {
        self.outputs.get_mut(&name)
    }

    /// Attach a layout object to every output that does not have one yet.
    pub fn activate_all(&mut self, mut create: impl FnMut(&Output<O, L>) -> L) {
        for output in self.outputs.values_mut().filter(|o| !o.is_active()) {
            let layout = create(output);
            output.attach_layout(layout);
        }
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl<O: Release, L: LayoutSink + Release> Default for Outputs<O, L> {
    fn default() -> Self {
        Self::new()
    }
}
