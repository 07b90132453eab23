//! Stand-ins for protocol objects, so sessions can be driven without a
//! compositor.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dwindle::Rect;
use crate::output::{LayoutSink, Release};

#[derive(Default)]
pub struct FakeHandle {
    pub released: Rc<Cell<u32>>,
}

impl Release for FakeHandle {
    fn release(&self) {
        self.released.set(self.released.get() + 1);
    }
}

#[derive(Debug, PartialEq)]
pub enum Call {
    Push(Rect, u32),
    Commit(String, u32),
}

#[derive(Default)]
pub struct RecordingLayout {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub released: Rc<Cell<u32>>,
}

impl LayoutSink for RecordingLayout {
    fn push_view_dimensions(&self, rect: Rect, serial: u32) {
        self.calls.borrow_mut().push(Call::Push(rect, serial));
    }

    fn commit(&self, layout_name: &str, serial: u32) {
        self.calls
            .borrow_mut()
            .push(Call::Commit(layout_name.to_string(), serial));
    }
}

impl Release for RecordingLayout {
    fn release(&self) {
        self.released.set(self.released.get() + 1);
    }
}
