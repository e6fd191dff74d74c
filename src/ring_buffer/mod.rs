use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Slots<T>{
    items: VecDeque<(T, u64)>,
    write_epoch: u64, //inc on every push, never reset
}

//bounded keep-last queue: when full, the oldest item is discarded (freshness bias)
pub struct RingBuffer<T>{
    slots: Mutex<Slots<T>>,
    ready: Condvar,
    capacity: usize,
}

impl<T: Clone> RingBuffer<T>{
    pub fn new(capacity: usize) -> Self{
        assert!(capacity > 0, "ring buffer capacity must be greater than 0");

        RingBuffer{
            slots: Mutex::new(Slots{
                items: VecDeque::with_capacity(capacity),
                write_epoch: 0,
            }),
            ready: Condvar::new(),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots<T>>{
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    //push item, return the epoch of the push
    pub fn push(&self, item: T) -> u64{
        let mut slots = self.lock();
        if slots.items.len() == self.capacity{
            slots.items.pop_front();
        }
        slots.write_epoch += 1;
        let epoch = slots.write_epoch;
        slots.items.push_back((item, epoch));
        drop(slots);

        self.ready.notify_one();
        epoch
    }

    //pop the oldest item
    pub fn pop(&self) -> Option<T>{
        self.lock().items.pop_front().map(|(item, _)| item)
    }

    //pop the oldest item, waiting up to `timeout` for one to arrive
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T>{
        let slots = self.lock();
        let (mut slots, _) = self.ready
            .wait_timeout_while(slots, timeout, |s| s.items.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        slots.items.pop_front().map(|(item, _)| item)
    }

    //latest item without removing it
    pub fn peek_latest(&self) -> Option<(T, u64)>{
        self.lock().items.back().cloned()
    }

    pub fn latest_epoch(&self) -> u64{
        self.lock().write_epoch
    }

    pub fn len(&self) -> usize{
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool{
        self.lock().items.is_empty()
    }

    pub fn is_full(&self) -> bool{
        self.lock().items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize{
        self.capacity
    }
}
