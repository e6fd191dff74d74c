use std::sync::Arc;
use std::time::Duration;
use crate::ring_buffer::RingBuffer;
use super::message::Message;

pub struct Topic<T: Message>{
    name: String,
    buffer: Arc<RingBuffer<T>>
}

impl<T: Message> Topic<T>{
    pub fn new(name: &str, depth: usize) -> Self{
        Topic{
            name: name.to_string(),
            buffer: Arc::new(RingBuffer::new(depth)),
        }
    }

    pub fn name(&self) -> &str{
        &self.name
    }

    pub fn publish(&self, msg: T) -> u64{
        self.buffer.push(msg)
    }

    pub fn try_receive(&self) -> Option<T>{
        self.buffer.pop()
    }

    pub fn receive_timeout(&self, timeout: Duration) -> Option<T>{
        self.buffer.pop_timeout(timeout)
    }

    pub fn peek_latest(&self) -> Option<(T, u64)>{
        self.buffer.peek_latest()
    }

    pub fn latest_epoch(&self) -> u64{
        self.buffer.latest_epoch()
    }

    pub fn len(&self) -> usize{
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool{
        self.buffer.is_empty()
    }

    pub fn depth(&self) -> usize{
        self.buffer.capacity()
    }
}

impl<T: Message> Clone for Topic<T>{
    fn clone(&self) -> Self{
        Topic{
            name: self.name.clone(),
            buffer: Arc::clone(&self.buffer),
        }
    }
}
