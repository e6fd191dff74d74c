use std::sync::Arc;
use crate::bridge::StatusPublisher;
use crate::uart::StatusFrame;
use super::topic::Topic;
use super::message::{DriveMsg, Message};

pub struct Publisher<T: Message>{
    topic: Arc<Topic<T>>,
}

impl<T: Message> Publisher<T>{
    pub fn new(topic: Arc<Topic<T>>) -> Self{
        Publisher{ topic }
    }

    pub fn publish(&self, msg: T) -> u64{
        self.topic.publish(msg)
    }

    pub fn topic_name(&self) -> &str{
        self.topic.name()
    }
}

impl<T: Message> Clone for Publisher<T>{
    fn clone(&self) -> Self{
        Publisher{ topic: Arc::clone(&self.topic) }
    }
}

impl StatusPublisher for Publisher<DriveMsg>{
    fn publish(&mut self, status: StatusFrame){
        self.topic.publish(DriveMsg::from(status));
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_publisher_publish(){
        let topic = Arc::new(Topic::<i32>::new("/test", 8));
        let publisher = Publisher::new(Arc::clone(&topic));
        let e1 = publisher.publish(10);
        let e2 = publisher.publish(20);
        assert_eq!(e1, 1);
        assert_eq!(e2, 2);
        assert_eq!(publisher.topic_name(), "/test");
        assert_eq!(topic.len(), 2);
    }

    #[test]
    fn test_status_publisher_converts_frame(){
        let topic = Arc::new(Topic::<DriveMsg>::new("/driveStatus", 4));
        let mut publisher = Publisher::new(Arc::clone(&topic));
        let status = StatusFrame{ steering_angle: 0.5, speed: 2.0, acceleration: 0.25, checksum: 0 };

        StatusPublisher::publish(&mut publisher, status);

        assert_eq!(topic.try_receive(), Some(DriveMsg::new(0.5, 2.0, 0.25)));
    }
}
