use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Create a single-slot channel: the sender overwrites an unread value, the
/// receiver only ever sees the newest one.
pub fn single_slot<T>() -> (SlotSender<T>, SlotReceiver<T>) {
    let (tx, rx) = bounded(1);
    (
        SlotSender {
            tx,
            evict: rx.clone(),
        },
        SlotReceiver { rx },
    )
}

/// Producer half. Never blocks.
pub struct SlotSender<T> {
    tx: Sender<T>,
    // Held to evict a stale value when the slot is full.
    evict: Receiver<T>,
}

impl<T> SlotSender<T> {
    /// Put `value` in the slot, dropping whatever the consumer has not read.
    pub fn publish(&self, mut value: T) {
        loop {
            match self.tx.try_send(value) {
                Ok(()) => return,
                Err(TrySendError::Full(v)) => {
                    let _ = self.evict.try_recv();
                    value = v;
                }
                // The sender keeps its own receiver alive, so this cannot happen.
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}

/// Consumer half.
pub struct SlotReceiver<T> {
    rx: Receiver<T>,
}

impl<T> SlotReceiver<T> {
    /// Take the newest published value, if any arrived since the last call.
    pub fn latest(&self) -> Option<T> {
        self.rx.try_iter().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unread_values_are_overwritten() {
        let (tx, rx) = single_slot();
        tx.publish(1);
        tx.publish(2);
        tx.publish(3);
        assert_eq!(rx.latest(), Some(3));
        assert_eq!(rx.latest(), None);
    }

    #[test]
    fn values_cross_threads() {
        let (tx, rx) = single_slot::<Vec<u32>>();
        std::thread::spawn(move || {
            for i in 0..100 {
                tx.publish(vec![i; 4]);
            }
        })
        .join()
        .unwrap();
        assert_eq!(rx.latest(), Some(vec![99; 4]));
    }
}
