use crate::checked::{align_up, checked_add, checked_mul, is_pow2};
use crate::status::{Result, Status};
use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

/// Bump allocator over a caller-owned memory block.
///
/// The `Arena` never allocates, frees or resizes the block. It only moves an
/// offset cursor forward through it, handing out non-overlapping regions,
/// until the block is exhausted or the arena is `reset`.
///
/// Allocation takes `&self` and returned memory borrows the arena, so any
/// number of regions can be held at once. `reset` takes `&mut self`, which
/// means the borrow checker rejects any attempt to keep a region from
/// [`alloc_bytes`](Arena::alloc_bytes) and friends alive across a reset.
/// Raw pointers from [`alloc`](Arena::alloc) carry no such protection: using
/// them after `reset` is the caller's responsibility.
///
/// Regions are aligned on their absolute address, so the block itself may
/// have any alignment.
///
/// There is no per-object deallocation. Values stored with `alloc_copy` are
/// `Copy` and never dropped.
///
/// The `Arena` is not `Sync`: it has no internal synchronisation.
pub struct Arena<'a> {
    base: NonNull<u8>,
    capacity: usize,
    offset: Cell<usize>,
    _block: PhantomData<&'a mut [u8]>,
}

// The arena is a unique borrow of its block; moving it between threads is
// as sound as moving the `&mut [u8]` itself.
unsafe impl<'a> Send for Arena<'a> {}

impl<'a> Arena<'a> {
    /// Binds a new arena to `block`. Capacity is the block length; the
    /// block contents are left untouched.
    pub fn new(block: &'a mut [u8]) -> Arena<'a> {
        let capacity = block.len();
        debug!("arena over {} bytes", capacity);
        Arena {
            // Slice pointers are never null, even for empty slices.
            base: NonNull::from(block).cast::<u8>(),
            capacity,
            offset: Cell::new(0),
            _block: PhantomData,
        }
    }

    /// Binds a new arena to a raw memory region, e.g. a linker-provided
    /// section with no Rust owner.
    ///
    /// `base` may be null only when `capacity` is zero; otherwise the call
    /// fails with `Status::Invalid`.
    ///
    /// # Safety
    ///
    /// `base..base + capacity` must be valid for reads and writes for `'a`,
    /// and must not be accessed through any other path while the arena or
    /// any region allocated from it is alive.
    pub unsafe fn from_raw_parts(base: *mut u8, capacity: usize) -> Result<Arena<'a>> {
        let base = match NonNull::new(base) {
            Some(base) => base,
            None if capacity == 0 => NonNull::dangling(),
            None => return Err(Status::Invalid),
        };
        debug!("arena over raw region of {} bytes", capacity);
        Ok(Arena {
            base,
            capacity,
            offset: Cell::new(0),
            _block: PhantomData,
        })
    }

    /// Total bytes in the bound block.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far, including alignment padding.
    #[inline(always)]
    pub fn used(&self) -> usize {
        self.offset.get()
    }

    /// Bytes not yet consumed. Alignment padding of the next request
    /// comes out of this.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity - self.offset.get()
    }

    /// Reserves `size` bytes aligned to `align` and returns their address.
    ///
    /// `align` must be a power of two; `0` means `1`. A `size` of zero
    /// succeeds with `None` and consumes nothing.
    ///
    /// Errors leave the arena untouched:
    ///
    /// - `Status::Invalid` if `align` is not a power of two;
    /// - `Status::Overflow` if rounding the cursor up to `align` wraps;
    /// - `Status::NoMem` if the aligned request does not fit.
    ///
    /// Rounding applies to the address, not the offset: on a block that is
    /// not itself `align`-aligned, the region lands past the next multiple
    /// of `align` in offset terms.
    ///
    /// The returned memory is not initialised by the arena; it holds
    /// whatever the block held.
    pub fn alloc(&self, size: usize, align: usize) -> Result<Option<NonNull<u8>>> {
        if size == 0 {
            return Ok(None);
        }
        let align = if align == 0 { 1 } else { align };
        if !is_pow2(align) {
            trace!("arena alloc of {} bytes rejected, align {} is not a power of two", size, align);
            return Err(Status::Invalid);
        }

        let offset = self.offset.get();
        let aligned = self.aligned_offset(offset, align).map_err(|e| {
            warn!("arena alloc: aligning offset {} to {} overflows", offset, align);
            e
        })?;

        if aligned > self.capacity || size > self.capacity - aligned {
            trace!(
                "arena alloc of {} bytes (align {}) does not fit, {} of {} used",
                size, align, offset, self.capacity
            );
            return Err(Status::NoMem);
        }

        let end = aligned + size;
        self.offset.set(end);
        invariant!(end <= self.capacity, "arena offset {} past capacity {}", end, self.capacity);
        trace!("arena alloc {} bytes at offset {}", size, aligned);

        // `aligned < capacity`, so the result stays inside the block.
        Ok(Some(unsafe { NonNull::new_unchecked(self.base.as_ptr().add(aligned)) }))
    }

    /// Like [`alloc`](Arena::alloc), but returns the region as a byte slice.
    /// A zero `size` yields an empty slice.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_bytes(&self, size: usize, align: usize) -> Result<&mut [u8]> {
        match self.alloc(size, align)? {
            // Each region is handed out once and the block is borrowed
            // mutably for 'a, so this is the only reference to it.
            Some(ptr) => Ok(unsafe { core::slice::from_raw_parts_mut(ptr.as_ptr(), size) }),
            None => Ok(&mut []),
        }
    }

    /// Copies `value` into the arena and returns a reference to the copy.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_copy<T: Copy>(&self, value: T) -> Result<&mut T> {
        let slot = match self.alloc(mem::size_of::<T>(), mem::align_of::<T>())? {
            Some(ptr) => ptr.cast::<T>(),
            None => NonNull::dangling(),
        };
        unsafe {
            ptr::write(slot.as_ptr(), value);
            Ok(&mut *slot.as_ptr())
        }
    }

    /// Copies `src` into the arena and returns the copy.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> Result<&mut [T]> {
        let size = checked_mul(src.len(), mem::size_of::<T>())?;
        let dst = match self.alloc(size, mem::align_of::<T>())? {
            Some(ptr) => ptr.cast::<T>(),
            None => NonNull::dangling(),
        };
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), src.len());
            Ok(core::slice::from_raw_parts_mut(dst.as_ptr(), src.len()))
        }
    }

    /// Forgets every allocation. The block contents are not cleared.
    pub fn reset(&mut self) {
        trace!("arena reset, {} bytes released", self.offset.get());
        self.offset.set(0);
    }

    /// Offset of the first `align`-aligned address at or after `offset`.
    fn aligned_offset(&self, offset: usize, align: usize) -> Result<usize> {
        let base = self.base.as_ptr() as usize;
        let aligned = align_up(checked_add(base, offset)?, align)?;
        Ok(aligned - base)
    }
}

impl<'a> fmt::Debug for Arena<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("used", &self.offset.get())
            .finish()
    }
}
