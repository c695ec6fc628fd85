//! MPEG-2 CRC32 (poly 0x04C11DB7, init 0xFFFFFFFF, MSB first, no final xor).
//!
//! This is not the reflected IEEE CRC-32: a section with a correct CRC
//! yields 0 when the CRC covers its own trailing four bytes.

use crc::{Crc, CRC_32_MPEG_2};

const CRC32_MPEG2: Crc<u32> = Crc::<u32>::new(&CRC_32_MPEG_2);

pub fn crc32_mpeg2(data: &[u8]) -> u32 {
    CRC32_MPEG2.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        // CRC-32/MPEG-2 catalogue check value
        assert_eq!(crc32_mpeg2(b"123456789"), 0x0376_E6E7);
    }

    #[test]
    fn residue_is_zero() {
        let mut data = b"sdt".to_vec();
        let crc = crc32_mpeg2(&data);
        data.extend_from_slice(&crc.to_be_bytes());
        assert_eq!(crc32_mpeg2(&data), 0);
    }
}
