use std::{cell::Cell, rc::Rc, task};

pub fn channel<T>() -> (Notifier<T>, Listener<T>) {
    let channel = Channel::init_connected();
    (Notifier::new(channel.clone()), Listener::new(channel))
}

struct ChannelInner<T> {
    connected: Cell<bool>,
    waker: Cell<Option<task::Waker>>,
    data: Cell<Option<T>>,
}

impl<T> ChannelInner<T> {
    fn init_connected() -> Self {
        Self {
            connected: Cell::new(true),
            waker: Cell::new(None),
            data: Cell::new(None),
        }
    }
}

struct Channel<T> {
    inner: Rc<ChannelInner<T>>,
}

impl<T> Channel<T> {
    fn init_connected() -> Self {
        Self { inner: Rc::new(ChannelInner::init_connected()) }
    }

    fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    fn disconnect(&self) -> bool {
        self.inner.connected.replace(false)
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// Sending half. Consumed by [`Notifier::send`], so at most one value ever
/// goes through a channel.
pub struct Notifier<T> {
    channel: Channel<T>,
}

impl<T> Notifier<T> {
    fn new(channel: Channel<T>) -> Self {
        Self { channel }
    }

    /// Stores `data` and wakes the listener. Returns `false` when the
    /// listener is already gone and `data` was discarded.
    pub fn send(self, data: T) -> bool {
        if !self.channel.is_connected() {
            return false;
        }
        self.channel.inner.data.set(Some(data));
        if let Some(waker) = self.channel.inner.waker.take() {
            waker.wake();
        }
        true
    }
}

pub struct Listener<T> {
    channel: Channel<T>,
}

impl<T> Listener<T> {
    fn new(channel: Channel<T>) -> Self {
        Self { channel }
    }

    pub fn receive(&self) -> Option<T> {
        self.channel.inner.data.take()
    }

    pub fn subscribe(&self, waker: &task::Waker) {
        let mut stored = self.channel.inner.waker.take();
        match &stored {
            Some(current) if current.will_wake(waker) => (),
            _ => stored = Some(waker.clone()),
        }
        self.channel.inner.waker.set(stored);
    }
}

impl<T> Drop for Listener<T> {
    fn drop(&mut self) {
        self.channel.disconnect();
    }
}
