#![no_main]

use arbitrary::Arbitrary;
use growbuf::{Counting, GrowableBuffer, Limited};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Reserve(u16),
    Push(u8),
    Extend(Vec<u8>),
    Clear,
    Release,
    SetLimit(u16),
}

#[derive(Arbitrary, Debug)]
struct Input {
    limit: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut buf = GrowableBuffer::with_allocator(Counting::new(Limited::new(input.limit.into())));
    let mut model: Vec<u8> = Vec::new();

    for op in input.ops {
        let len = buf.len();
        let capacity = buf.capacity();
        let ptr = buf.as_bytes().as_ptr();

        let result = match op {
            Op::Reserve(need) => buf.reserve(need.into()),
            Op::Push(byte) => buf.push_byte(byte).map(|()| model.push(byte)),
            Op::Extend(bytes) => buf
                .extend_from_slice(&bytes)
                .map(|()| model.extend_from_slice(&bytes)),
            Op::Clear => {
                buf.clear();
                model.clear();
                assert_eq!(buf.capacity(), capacity);
                Ok(())
            }
            Op::Release => {
                buf.release();
                model.clear();
                assert_eq!(buf.capacity(), 0);
                assert!(!buf.is_allocated());
                Ok(())
            }
            Op::SetLimit(limit) => {
                buf.allocator_mut().inner_mut().set_limit(limit.into());
                Ok(())
            }
        };

        if let Err(err) = result {
            // A refused growth is invisible apart from the error.
            assert_eq!(buf.len(), len);
            assert_eq!(buf.capacity(), capacity);
            assert_eq!(buf.as_bytes().as_ptr(), ptr);
            assert!(err.requested() > buf.allocator().inner().limit());
        }

        buf.debug_check_invariants();
        assert_eq!(buf.as_bytes(), model.as_slice());
    }
});
