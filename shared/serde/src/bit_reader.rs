use crate::error::SerdeErr;

pub struct BitReader<'b> {
    buffer: &'b [u8],
    scratch_index: u8,
    buffer_index: usize,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            scratch_index: 0,
            buffer_index: 0,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        let Some(byte) = self.buffer.get(self.buffer_index) else {
            return Err(SerdeErr::UnexpectedEnd {
                bytes_read: self.buffer_index,
            });
        };
        let bit = (byte >> self.scratch_index) & 1 != 0;

        self.scratch_index += 1;
        if self.scratch_index >= 8 {
            self.scratch_index = 0;
            self.buffer_index += 1;
        }

        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        if self.scratch_index == 0 {
            let Some(byte) = self.buffer.get(self.buffer_index) else {
                return Err(SerdeErr::UnexpectedEnd {
                    bytes_read: self.buffer_index,
                });
            };
            self.buffer_index += 1;
            return Ok(*byte);
        }

        let mut output: u8 = 0;
        for i in 0..8 {
            if self.read_bit()? {
                output |= 1 << i;
            }
        }
        Ok(output)
    }

    /// Fails up front, without reading or allocating, when fewer than `count`
    /// whole bytes are left
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SerdeErr> {
        if count > self.bytes_remaining() {
            return Err(SerdeErr::UnexpectedEnd {
                bytes_read: self.buffer_index,
            });
        }
        let mut output = Vec::with_capacity(count);
        for _ in 0..count {
            output.push(self.read_byte()?);
        }
        Ok(output)
    }

    /// Whole bytes left unread
    pub fn bytes_remaining(&self) -> usize {
        let consumed = self.buffer_index + usize::from(self.scratch_index > 0);
        self.buffer.len().saturating_sub(consumed)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer_index >= self.buffer.len()
    }
}
