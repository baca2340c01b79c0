use std::borrow::Cow;

/// An SDF byte buffer meant for reading.
///
/// Example usage:
///
/// ```
/// use std::borrow::Cow;
/// let mut bb = sdf_format::ScriptBuffer::new(&[240, 159, 141, 149, 0, 42, 0, 0, 0]);
/// assert_eq!(bb.read_string(), Ok(Cow::Borrowed("🍕")));
/// assert_eq!(bb.read_u32(), Ok(42));
/// ```
///
pub struct ScriptBuffer<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> ScriptBuffer<'a> {
    /// Create a new ScriptBuffer that wraps the provided byte slice. The
    /// lifetime of the returned ScriptBuffer must not outlive the lifetime of
    /// the byte slice.
    pub fn new(data: &[u8]) -> ScriptBuffer {
        ScriptBuffer { data, index: 0 }
    }

    /// Retrieves the underlying byte slice.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Retrieves the current index into the underlying byte slice. This starts
    /// off as 0 and ends up as `self.data().len()` when everything has been
    /// read.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true once every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.index >= self.data.len()
    }

    /// Try to read a byte starting at the current index.
    pub fn read_byte(&mut self) -> Result<u8, ()> {
        if self.index >= self.data.len() {
            Err(())
        } else {
            let value = self.data[self.index];
            self.index = self.index + 1;
            Ok(value)
        }
    }

    /// Try to read `len` bytes starting at the current index.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ()> {
        if self.index + len > self.data.len() {
            Err(())
        } else {
            let value = &self.data[self.index..self.index + len];
            self.index = self.index + len;
            Ok(value)
        }
    }

    /// Try to read a little-endian unsigned 32-bit integer starting at the
    /// current index.
    pub fn read_u32(&mut self) -> Result<u32, ()> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().map_err(|_| ())?))
    }

    /// Try to read a little-endian signed 64-bit integer starting at the
    /// current index.
    pub fn read_i64(&mut self) -> Result<i64, ()> {
        let bytes = self.read_bytes(8)?;
        Ok(i64::from_le_bytes(bytes.try_into().map_err(|_| ())?))
    }

    /// Try to read a null-terminated UTF-8 string starting at the current
    /// index. This string is returned as a slice so it just aliases the
    /// underlying memory.
    pub fn read_string(&mut self) -> Result<Cow<'a, str>, ()> {
        let start = self.index;

        while self.index < self.data.len() {
            if self.data[self.index] == 0 {
                self.index += 1;
                return Ok(String::from_utf8_lossy(&self.data[start..self.index - 1]));
            }

            self.index += 1;
        }

        Err(())
    }
}

#[test]
fn read_byte() {
    let read = |bytes| ScriptBuffer::new(bytes).read_byte();
    assert_eq!(read(&[]), Err(()));
    assert_eq!(read(&[0]), Ok(0));
    assert_eq!(read(&[1]), Ok(1));
    assert_eq!(read(&[254]), Ok(254));
    assert_eq!(read(&[255]), Ok(255));
}

#[test]
fn read_bytes() {
    let read = |bytes, len| ScriptBuffer::new(bytes).read_bytes(len);
    assert_eq!(read(&[], 0), Ok(vec![].as_slice()));
    assert_eq!(read(&[], 1), Err(()));
    assert_eq!(read(&[0], 0), Ok(vec![].as_slice()));
    assert_eq!(read(&[0], 1), Ok(vec![0].as_slice()));
    assert_eq!(read(&[0], 2), Err(()));

    let mut bb = ScriptBuffer::new(&[1, 2, 3, 4, 5]);
    assert_eq!(bb.read_bytes(3), Ok(vec![1, 2, 3].as_slice()));
    assert_eq!(bb.read_bytes(2), Ok(vec![4, 5].as_slice()));
    assert_eq!(bb.read_bytes(1), Err(()));
}

#[test]
fn read_u32() {
    let read = |bytes| ScriptBuffer::new(bytes).read_u32();
    assert_eq!(read(&[]), Err(()));
    assert_eq!(read(&[1, 0, 0]), Err(()));
    assert_eq!(read(&[0, 0, 0, 0]), Ok(0));
    assert_eq!(read(&[1, 0, 0, 0]), Ok(1));
    assert_eq!(read(&[255, 0, 0, 0]), Ok(255));
    assert_eq!(read(&[0, 1, 0, 0]), Ok(256));
    assert_eq!(read(&[255, 255, 255, 255]), Ok(4294967295));
}

#[test]
fn read_i64() {
    let read = |bytes| ScriptBuffer::new(bytes).read_i64();
    assert_eq!(read(&[]), Err(()));
    assert_eq!(read(&[0, 0, 0, 0, 0, 0, 0]), Err(()));
    assert_eq!(read(&[0, 0, 0, 0, 0, 0, 0, 0]), Ok(0));
    assert_eq!(read(&[1, 0, 0, 0, 0, 0, 0, 0]), Ok(1));
    assert_eq!(
        read(&[255, 255, 255, 255, 255, 255, 255, 255]),
        Ok(-1)
    );
    assert_eq!(
        read(&[255, 255, 255, 255, 255, 255, 255, 127]),
        Ok(i64::MAX)
    );
    assert_eq!(read(&[0, 0, 0, 0, 0, 0, 0, 128]), Ok(i64::MIN));
}

#[test]
fn read_string() {
    let read = |bytes| ScriptBuffer::new(bytes).read_string();
    assert_eq!(read(&[]), Err(()));
    assert_eq!(read(&[0]), Ok(Cow::Borrowed("")));
    assert_eq!(read(&[97]), Err(()));
    assert_eq!(read(&[97, 0]), Ok(Cow::Borrowed("a")));
    assert_eq!(read(&[97, 98, 99, 0]), Ok(Cow::Borrowed("abc")));
    assert_eq!(read(&[240, 159, 141, 149, 0]), Ok(Cow::Borrowed("🍕")));
    assert_eq!(
        read(&[97, 237, 160, 188, 99, 0]),
        Ok(Cow::Owned("a���c".to_owned()))
    );
}

#[test]
fn read_sequence() {
    let mut bb = ScriptBuffer::new(&[
        2, 0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 115, 121, 115, 0,
    ]);
    assert_eq!(bb.read_u32(), Ok(2));
    assert_eq!(bb.read_i64(), Ok(-1));
    assert_eq!(bb.read_string(), Ok(Cow::Borrowed("sys")));
    assert!(bb.is_at_end());
}

/// An SDF byte buffer meant for writing.
///
/// Example usage:
///
/// ```
/// let mut bb = sdf_format::ScriptBufferMut::new();
/// bb.write_string("🍕");
/// bb.write_u32(42);
/// assert_eq!(bb.data(), [240, 159, 141, 149, 0, 42, 0, 0, 0]);
/// ```
///
pub struct ScriptBufferMut {
    data: Vec<u8>,
}

impl ScriptBufferMut {
    /// Creates an empty ScriptBufferMut ready for writing.
    pub fn new() -> ScriptBufferMut {
        ScriptBufferMut { data: vec![] }
    }

    /// Consumes this buffer and returns the underlying backing store. Use this
    /// to get the data out when you're done writing to the buffer.
    pub fn data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Write a byte to the end of the buffer.
    pub fn write_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Write a raw byte slice to the end of the buffer.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
    }

    /// Write a little-endian unsigned 32-bit integer to the end of the buffer.
    pub fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a little-endian signed 64-bit integer to the end of the buffer.
    pub fn write_i64(&mut self, value: i64) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a UTF-8 string to the end of the buffer, followed by a single
    /// null terminator. The text itself must not contain a null byte or a
    /// reader scanning for the terminator will split the field early; callers
    /// are expected to reject such text before writing.
    pub fn write_string(&mut self, value: &str) {
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
    }
}

#[cfg(test)]
fn write_once(cb: fn(&mut ScriptBufferMut)) -> Vec<u8> {
    let mut bb = ScriptBufferMut::new();
    cb(&mut bb);
    bb.data()
}

#[test]
fn write_byte() {
    assert_eq!(write_once(|bb| bb.write_byte(0)), [0]);
    assert_eq!(write_once(|bb| bb.write_byte(1)), [1]);
    assert_eq!(write_once(|bb| bb.write_byte(254)), [254]);
    assert_eq!(write_once(|bb| bb.write_byte(255)), [255]);
}

#[test]
fn write_bytes() {
    let mut bb = ScriptBufferMut::new();
    bb.write_bytes(&[1, 2, 3]);
    bb.write_bytes(&[]);
    bb.write_bytes(&[4, 5]);
    assert_eq!(bb.data(), [1, 2, 3, 4, 5]);
}

#[test]
fn write_u32() {
    assert_eq!(write_once(|bb| bb.write_u32(0)), [0, 0, 0, 0]);
    assert_eq!(write_once(|bb| bb.write_u32(1)), [1, 0, 0, 0]);
    assert_eq!(write_once(|bb| bb.write_u32(255)), [255, 0, 0, 0]);
    assert_eq!(write_once(|bb| bb.write_u32(256)), [0, 1, 0, 0]);
    assert_eq!(
        write_once(|bb| bb.write_u32(4294967295)),
        [255, 255, 255, 255]
    );
}

#[test]
fn write_i64() {
    assert_eq!(
        write_once(|bb| bb.write_i64(0)),
        [0, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(
        write_once(|bb| bb.write_i64(1)),
        [1, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(
        write_once(|bb| bb.write_i64(-1)),
        [255, 255, 255, 255, 255, 255, 255, 255]
    );
    assert_eq!(
        write_once(|bb| bb.write_i64(i64::MAX)),
        [255, 255, 255, 255, 255, 255, 255, 127]
    );
    assert_eq!(
        write_once(|bb| bb.write_i64(i64::MIN)),
        [0, 0, 0, 0, 0, 0, 0, 128]
    );
}

#[test]
fn write_string() {
    assert_eq!(write_once(|bb| bb.write_string("")), [0]);
    assert_eq!(write_once(|bb| bb.write_string("a")), [97, 0]);
    assert_eq!(write_once(|bb| bb.write_string("abc")), [97, 98, 99, 0]);
    assert_eq!(
        write_once(|bb| bb.write_string("🍕")),
        [240, 159, 141, 149, 0]
    );
}

#[test]
fn write_sequence() {
    let mut bb = ScriptBufferMut::new();
    bb.write_u32(2);
    bb.write_i64(-1);
    bb.write_string("sys");
    assert_eq!(
        bb.data(),
        [2, 0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 115, 121, 115, 0]
    );
}

#[test]
fn write_then_read() {
    let mut bb = ScriptBufferMut::new();
    bb.write_i64(-6148914691236517206);
    bb.write_string("to");
    bb.write_string("");
    let data = bb.data();

    let mut rb = ScriptBuffer::new(&data);
    assert_eq!(rb.read_i64(), Ok(-6148914691236517206));
    assert_eq!(rb.read_string(), Ok(Cow::Borrowed("to")));
    assert_eq!(rb.read_string(), Ok(Cow::Borrowed("")));
    assert!(rb.is_at_end());
}
