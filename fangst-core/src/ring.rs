//! Bounded lock-free inbound packet queue.
//!
//! Multiple producers (capture cores) enqueue concurrently; a single writer
//! loop drains in bounded bursts. Built on `crossbeam`'s array queue with
//! backpressure signaling instead of blocking:
//! - Non-blocking push/pop, no locks anywhere
//! - Batch dequeue sized by the consumer's burst budget
//! - Explicit queue-full result so producers decide the drop policy

use crossbeam::queue::ArrayQueue;
use std::sync::Arc;
use thiserror::Error;

use crate::packet::Packet;

/// Ring error conditions.
#[derive(Error, Debug)]
pub enum RingError {
    #[error("Invalid capacity (must be a power of two)")]
    InvalidCapacity,
}

/// Shared handle to the inbound packet queue.
pub struct PacketRing {
    inner: Arc<ArrayQueue<Packet>>,
}

impl PacketRing {
    /// Creates a ring with the given capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Must be a power of two for efficient index masking.
    pub fn with_capacity(capacity: usize) -> Result<Self, RingError> {
        if !capacity.is_power_of_two() {
            return Err(RingError::InvalidCapacity);
        }

        Ok(Self {
            inner: Arc::new(ArrayQueue::new(capacity)),
        })
    }

    /// Creates a new handle to the shared ring.
    #[inline]
    pub fn share(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Attempts to enqueue a packet without blocking.
    ///
    /// On a full queue the packet is handed back so the producer keeps
    /// ownership and decides whether to retry or drop.
    #[inline]
    pub fn try_push(&self, packet: Packet) -> Result<(), Packet> {
        self.inner.push(packet)
    }

    /// Attempts to dequeue a single packet without blocking.
    #[inline]
    pub fn try_pop(&self) -> Option<Packet> {
        self.inner.pop()
    }

    /// Dequeues up to `max` packets into `out`, returning the count.
    ///
    /// An empty result is not an error, just "no work yet".
    #[inline]
    pub fn pop_burst(&self, out: &mut Vec<Packet>, max: usize) -> usize {
        let mut count = 0;
        while count < max {
            match self.inner.pop() {
                Some(packet) => {
                    out.push(packet);
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn test_packet(seq: u8) -> Packet {
        Packet::new(Bytes::from(vec![seq; 4]), 4)
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(matches!(
            PacketRing::with_capacity(3),
            Err(RingError::InvalidCapacity)
        ));
    }

    #[test]
    fn maintains_fifo_order() {
        let ring = PacketRing::with_capacity(4).unwrap();
        ring.try_push(test_packet(1)).unwrap();
        ring.try_push(test_packet(2)).unwrap();

        assert_eq!(ring.try_pop().unwrap().bytes()[0], 1);
        assert_eq!(ring.try_pop().unwrap().bytes()[0], 2);
    }

    #[test]
    fn full_ring_returns_packet_to_producer() {
        let ring = PacketRing::with_capacity(2).unwrap();
        ring.try_push(test_packet(1)).unwrap();
        ring.try_push(test_packet(2)).unwrap();

        let rejected = ring.try_push(test_packet(3)).unwrap_err();
        assert_eq!(rejected.bytes()[0], 3);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn burst_pop_is_bounded() {
        let ring = PacketRing::with_capacity(8).unwrap();
        for i in 0..5 {
            ring.try_push(test_packet(i)).unwrap();
        }

        let mut batch = Vec::new();
        assert_eq!(ring.pop_burst(&mut batch, 3), 3);
        assert_eq!(batch.len(), 3);
        assert_eq!(ring.pop_burst(&mut batch, 3), 2);
        assert_eq!(ring.pop_burst(&mut batch, 3), 0);
    }

    #[test]
    fn concurrent_producers_single_consumer() {
        use std::thread;

        let ring = PacketRing::with_capacity(1024).unwrap();
        let mut handles = vec![];

        for i in 0..4 {
            let producer = ring.share();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    producer.try_push(test_packet(i)).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let mut batch = Vec::new();
        let mut total = 0;
        loop {
            let n = ring.pop_burst(&mut batch, 64);
            if n == 0 {
                break;
            }
            total += n;
        }
        assert_eq!(total, 400);
    }
}
