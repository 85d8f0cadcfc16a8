//! Fixed-capacity byte FIFO over a caller-owned block.
//!
//! Bytes live in a circular buffer indexed by `head` (next write) and `tail`
//! (next read). `head == tail` means either empty or full, so occupancy is
//! disambiguated by an explicit `full` flag, which is set only by `push` and
//! cleared only by a non-empty `pop` or `clear`.
//!
//! Every `push` and `pop` is all-or-nothing: the size checks run before any
//! byte moves or any index changes, so a failed call never tears the stream.

use crate::status::{Result, Status};
use core::fmt;

/// Byte FIFO of fixed capacity over a borrowed block.
///
/// Push and pop move whole requests or nothing, wrapping around the end of
/// the block as needed.
pub struct RingBuffer<'a> {
    buf: &'a mut [u8],
    head: usize,
    tail: usize,
    full: bool,
}

impl<'a> RingBuffer<'a> {
    /// Binds an empty ring to `block`; capacity is the block length.
    pub fn new(block: &'a mut [u8]) -> RingBuffer<'a> {
        debug!("ring over {} bytes", block.len());
        RingBuffer {
            buf: block,
            head: 0,
            tail: 0,
            full: false,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of buffered bytes.
    #[inline]
    pub fn len(&self) -> usize {
        if self.full {
            self.capacity()
        } else if self.head >= self.tail {
            self.head - self.tail
        } else {
            self.capacity() - (self.tail - self.head)
        }
    }

    /// Bytes that can be pushed before the ring is full.
    #[inline]
    pub fn free_space(&self) -> usize {
        self.capacity() - self.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.full && self.head == self.tail
    }

    /// True when the ring holds `capacity` bytes. A zero-capacity ring is
    /// never full; it is always empty.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Appends all of `data`, or nothing.
    ///
    /// - empty `data` always succeeds, whatever the capacity;
    /// - `Status::Range` if the ring has zero capacity;
    /// - `Status::Full` if `data` is longer than [`free_space`](Self::free_space).
    pub fn push(&mut self, data: &[u8]) -> Result<()> {
        let n = data.len();
        if n == 0 {
            return Ok(());
        }
        let cap = self.capacity();
        if cap == 0 {
            return Err(Status::Range);
        }
        if n > self.free_space() {
            trace!("ring push of {} bytes refused, {} free", n, self.free_space());
            return Err(Status::Full);
        }

        let first = (cap - self.head).min(n);
        self.buf[self.head..self.head + first].copy_from_slice(&data[..first]);
        self.buf[..n - first].copy_from_slice(&data[first..]);

        self.head = (self.head + n) % cap;
        // Only reachable with n <= free_space, so equality here means the
        // ring now holds exactly `cap` bytes.
        self.full = self.head == self.tail;
        self.check();
        trace!("ring push {} bytes, {} buffered", n, self.len());
        Ok(())
    }

    /// Fills all of `out` with the oldest buffered bytes, or reads nothing.
    ///
    /// - empty `out` always succeeds and leaves the ring as it was;
    /// - `Status::Empty` if `out` is longer than [`len`](Self::len).
    pub fn pop(&mut self, out: &mut [u8]) -> Result<()> {
        let n = out.len();
        if n == 0 {
            return Ok(());
        }
        if n > self.len() {
            trace!("ring pop of {} bytes refused, {} buffered", n, self.len());
            return Err(Status::Empty);
        }

        let cap = self.capacity();
        let first = (cap - self.tail).min(n);
        out[..first].copy_from_slice(&self.buf[self.tail..self.tail + first]);
        out[first..].copy_from_slice(&self.buf[..n - first]);

        self.tail = (self.tail + n) % cap;
        self.full = false;
        self.check();
        trace!("ring pop {} bytes, {} buffered", n, self.len());
        Ok(())
    }

    /// Drops everything buffered. Stored bytes are not cleared.
    pub fn clear(&mut self) {
        trace!("ring clear, {} bytes dropped", self.len());
        self.head = 0;
        self.tail = 0;
        self.full = false;
    }

    /// Buffered bytes in FIFO order, as up to two slices.
    ///
    /// The second slice is non-empty only when the data wraps past the end
    /// of the block.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        let len = self.len();
        if len == 0 {
            return (&[], &[]);
        }
        let first = (self.capacity() - self.tail).min(len);
        (&self.buf[self.tail..self.tail + first], &self.buf[..len - first])
    }

    #[inline(always)]
    fn check(&self) {
        let cap = self.capacity();
        invariant!(
            cap == 0 || (self.head < cap && self.tail < cap),
            "ring index out of bounds: head {} tail {} capacity {}", self.head, self.tail, cap
        );
        invariant!(
            !self.full || self.head == self.tail,
            "ring marked full with head {} != tail {}", self.head, self.tail
        );
    }
}

impl<'a> fmt::Debug for RingBuffer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("full", &self.full)
            .finish()
    }
}

#[cfg(test)]
mod ring_tests {
    use crate::{RingBuffer, Status};

    fn popped<'b>(ring: &mut RingBuffer<'_>, out: &'b mut [u8]) -> &'b [u8] {
        ring.pop(out).expect("pop");
        out
    }

    #[test]
    fn capacity_8_wraparound_scenario() {
        let mut block = [0u8; 8];
        let mut ring = RingBuffer::new(&mut block);

        ring.push(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(&[1u8, 2, 3][..], popped(&mut ring, &mut [0u8; 3]));
        assert_eq!(2, ring.len());

        ring.push(&[6, 7, 8, 9, 10]).unwrap();
        assert_eq!(7, ring.len());
        let (a, b) = ring.as_slices();
        assert_eq!(&[4u8, 5, 6, 7, 8][..], a);
        assert_eq!(&[9u8, 10][..], b);

        assert_eq!(&[4u8, 5, 6, 7, 8, 9, 10][..], popped(&mut ring, &mut [0u8; 7]));
        assert_eq!(0, ring.len());
        assert!(ring.is_empty());
    }

    #[test]
    fn zero_capacity_ring() {
        let mut ring = RingBuffer::new(&mut []);
        assert_eq!(Err(Status::Range), ring.push(&[1]));
        assert_eq!(Ok(()), ring.push(&[]));
        assert_eq!(Ok(()), ring.pop(&mut []));
        assert_eq!(Err(Status::Empty), ring.pop(&mut [0u8; 1]));
        assert_eq!(0, ring.len());
        assert_eq!(0, ring.free_space());
        assert!(ring.is_empty());
        assert!(!ring.is_full());
    }

    #[test]
    fn exact_fill_sets_full_and_pop_clears_it() {
        let mut block = [0u8; 4];
        let mut ring = RingBuffer::new(&mut block);

        ring.push(&[1, 2]).unwrap();
        assert!(!ring.is_full());
        ring.push(&[3, 4]).unwrap();
        assert!(ring.is_full());
        assert_eq!(4, ring.len());
        assert_eq!(0, ring.free_space());

        assert_eq!(&[1u8][..], popped(&mut ring, &mut [0u8; 1]));
        assert!(!ring.is_full());
        assert_eq!(3, ring.len());
    }

    #[test]
    fn zero_length_pop_keeps_a_full_ring_full() {
        let mut block = [0u8; 3];
        let mut ring = RingBuffer::new(&mut block);
        ring.push(&[7, 8, 9]).unwrap();

        assert_eq!(Ok(()), ring.pop(&mut []));
        assert!(ring.is_full());
        assert_eq!(3, ring.len());
        assert_eq!(Err(Status::Full), ring.push(&[1]));
    }

    #[test]
    fn overfull_push_writes_nothing() {
        let mut block = [0u8; 5];
        let mut ring = RingBuffer::new(&mut block);
        ring.push(&[1, 2, 3]).unwrap();

        assert_eq!(Err(Status::Full), ring.push(&[4, 5, 6]));
        assert_eq!(3, ring.len());
        assert_eq!(&[1u8, 2, 3][..], popped(&mut ring, &mut [0u8; 3]));
    }

    #[test]
    fn overlong_pop_reads_nothing() {
        let mut block = [0u8; 5];
        let mut ring = RingBuffer::new(&mut block);
        ring.push(&[1, 2]).unwrap();

        let mut out = [0xAAu8; 3];
        assert_eq!(Err(Status::Empty), ring.pop(&mut out));
        assert_eq!([0xAAu8; 3], out);
        assert_eq!(2, ring.len());
    }

    #[test]
    fn full_wrapped_ring_drains_in_order() {
        let mut block = [0u8; 6];
        let mut ring = RingBuffer::new(&mut block);
        ring.push(&[0, 0, 0, 0]).unwrap();
        ring.pop(&mut [0u8; 4]).unwrap();

        ring.push(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert!(ring.is_full());
        assert_eq!(&[1u8, 2, 3, 4, 5, 6][..], popped(&mut ring, &mut [0u8; 6]));
        assert!(ring.is_empty());
    }

    #[test]
    fn clear_empties_a_full_ring() {
        let mut block = [0u8; 2];
        let mut ring = RingBuffer::new(&mut block);
        ring.push(&[1, 2]).unwrap();
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(2, ring.free_space());
        assert_eq!((&[][..], &[][..]), ring.as_slices());
    }

    mod proptests {
        use crate::{RingBuffer, Status};
        use proptest::prelude::*;
        use std::collections::VecDeque;

        #[derive(Clone, Debug)]
        enum Op {
            Push(Vec<u8>),
            Pop(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                proptest::collection::vec(any::<u8>(), 0..12).prop_map(Op::Push),
                (0usize..12).prop_map(Op::Pop),
            ]
        }

        proptest! {
            #[test]
            fn behaves_like_a_bounded_deque(
                cap in 0usize..10,
                ops in proptest::collection::vec(op(), 1..60),
            ) {
                let mut block = vec![0u8; cap];
                let mut ring = RingBuffer::new(&mut block);
                let mut model: VecDeque<u8> = VecDeque::new();

                for op in ops {
                    match op {
                        Op::Push(data) => {
                            let before = ring.len();
                            let result = ring.push(&data);
                            if data.is_empty() {
                                prop_assert_eq!(result, Ok(()));
                            } else if cap == 0 {
                                prop_assert_eq!(result, Err(Status::Range));
                            } else if data.len() > cap - model.len() {
                                prop_assert_eq!(result, Err(Status::Full));
                                prop_assert_eq!(ring.len(), before);
                            } else {
                                prop_assert_eq!(result, Ok(()));
                                model.extend(data.iter().copied());
                            }
                        }
                        Op::Pop(n) => {
                            let before = ring.len();
                            let mut out = vec![0u8; n];
                            let result = ring.pop(&mut out);
                            if n > model.len() {
                                prop_assert_eq!(result, Err(Status::Empty));
                                prop_assert_eq!(ring.len(), before);
                            } else {
                                prop_assert_eq!(result, Ok(()));
                                let expected: Vec<u8> = model.drain(..n).collect();
                                prop_assert_eq!(out, expected);
                            }
                        }
                    }

                    prop_assert_eq!(ring.len(), model.len());
                    prop_assert_eq!(ring.len() + ring.free_space(), cap);
                    prop_assert_eq!(ring.is_full(), cap > 0 && model.len() == cap);
                    let (a, b) = ring.as_slices();
                    let buffered: Vec<u8> = a.iter().chain(b.iter()).copied().collect();
                    let modelled: Vec<u8> = model.iter().copied().collect();
                    prop_assert_eq!(buffered, modelled);
                }
            }

            #[test]
            fn round_trip_across_the_wrap_point(
                cap in 1usize..32,
                skew in 0usize..32,
                seed in any::<u8>(),
            ) {
                let skew = skew % cap;
                let mut block = vec![0u8; cap];
                let mut ring = RingBuffer::new(&mut block);
                let mut scratch = vec![0u8; skew];
                ring.push(&scratch).unwrap();
                ring.pop(&mut scratch).unwrap();

                for n in 0..=cap {
                    let data: Vec<u8> = (0..n).map(|i| seed.wrapping_add(i as u8)).collect();
                    ring.push(&data).unwrap();
                    let mut out = vec![0u8; n];
                    ring.pop(&mut out).unwrap();
                    prop_assert_eq!(out, data);
                    prop_assert!(ring.is_empty());
                }
            }
        }
    }
}
