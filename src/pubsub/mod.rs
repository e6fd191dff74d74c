pub mod message;
pub mod topic;
pub mod publisher;
pub mod subscriber;
pub mod registry;

pub use message::{Message, DriveMsg};
pub use topic::Topic;
pub use publisher::Publisher;
pub use subscriber::Subscriber;
pub use registry::TopicRegistry;

#[cfg(test)]
mod tests{
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_pubsub_threaded(){
        let registry = TopicRegistry::new();
        let topic: Arc<Topic<i32>> = registry.get_or_create("/threaded", 2048);

        let publisher = Publisher::new(Arc::clone(&topic));
        let subscriber = Subscriber::new(Arc::clone(&topic));

        let num_items = 1000;

        let producer = thread::spawn(move ||{
            for i in 0..num_items{
                publisher.publish(i);
            }
        });

        let consumer = thread::spawn(move ||{
            let mut received = Vec::new();
            while received.len() < num_items as usize{
                match subscriber.recv_timeout(Duration::from_secs(5)){
                    Some(val) => received.push(val),
                    None => break,
                }
            }
            received
        });

        producer.join().unwrap();
        let received = consumer.join().unwrap();

        assert_eq!(received.len(), num_items as usize);
        for i in 1..received.len(){
            assert!(received[i] > received[i - 1]);
        }
    }
}
