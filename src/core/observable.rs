use std::fmt;

type Listener<T> = Box<dyn FnMut(&T)>;

/// Value holder that notifies subscribed listeners after every write.
///
/// Listeners run synchronously inside `set`/`update`, in subscription order,
/// and only observe the new value; they cannot write back into the holder.
pub struct Observable<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Registers a listener and returns the number of listeners now attached.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> usize {
        self.listeners.push(Box::new(listener));
        self.listeners.len()
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutates the value in place, then notifies.
    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.value);
        self.notify();
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::Observable;

    #[test]
    fn listeners_see_every_write() {
        let seen = Rc::new(Cell::new(0));
        let mut value = Observable::new(1);
        let sink = Rc::clone(&seen);
        value.subscribe(move |v| sink.set(sink.get() + *v));

        value.set(2);
        value.update(|v| *v += 3);

        assert_eq!(*value.get(), 5);
        assert_eq!(seen.get(), 7);
    }
}
