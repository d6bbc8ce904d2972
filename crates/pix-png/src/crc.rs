/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! CRC32 as PNG uses it, the ISO-HDLC polynomial with bits reflected.

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 {
                0xEDB8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_crc_table();

fn crc32_update(mut crc: u32, bytes: &[u8]) -> u32 {
    for byte in bytes {
        crc = CRC_TABLE[((crc ^ u32::from(*byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

/// The CRC a PNG chunk must carry, computed over the four byte type
/// tag followed by the chunk data.
pub(crate) fn chunk_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let crc = crc32_update(u32::MAX, chunk_type);
    !crc32_update(crc, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_crc_values() {
        // every empty IEND chunk in existence carries this value
        assert_eq!(chunk_crc(b"IEND", &[]), 0xAE42_6082);
    }
}
