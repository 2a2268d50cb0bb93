//! Kupyna-256 hash function (DSTU 7564:2014)
//!
//! The 256-bit parameterization works on a 512-bit state of 8 columns by
//! 8 rows. Two AES-like permutations T⊕ and T+ differ only in how the round
//! constants enter the state: T⊕ XORs them into row 0, T+ adds them to whole
//! columns modulo 2^64. Compression is h ← T⊕(h ⊕ m) ⊕ T+(m) ⊕ h with a
//! final output transform h ← T⊕(h) ⊕ h truncated to the trailing 32 bytes.

const ROWS: usize = 8;
const COLS: usize = 8;
const ROUNDS: u8 = 10;
const BLOCK_BYTES: usize = 64;
const DIGEST_BYTES: usize = 32;
const LENGTH_BYTES: usize = 12;

/// state[column][row]; a column is 8 consecutive message bytes, read as a
/// little-endian u64 by the T+ round constants
type State = [[u8; ROWS]; COLS];

/// First row of the circulant MDS matrix over GF(2^8) mod x^8+x^4+x^3+x^2+1
const MDS_VECTOR: [u8; 8] = [0x01, 0x01, 0x05, 0x01, 0x08, 0x06, 0x07, 0x04];

/// The four Kupyna S-boxes, applied to row i via SBOXES[i mod 4]
#[rustfmt::skip]
static SBOXES: [[u8; 256]; 4] = [
    [
        0xa8, 0x43, 0x5f, 0x06, 0x6b, 0x75, 0x6c, 0x59, 0x71, 0xdf, 0x87, 0x95, 0x17, 0xf0, 0xd8, 0x09,
        0x6d, 0xf3, 0x1d, 0xcb, 0xc9, 0x4d, 0x2c, 0xaf, 0x79, 0xe0, 0x97, 0xfd, 0x6f, 0x4b, 0x45, 0x39,
        0x3e, 0xdd, 0xa3, 0x4f, 0xb4, 0xb6, 0x9a, 0x0e, 0x1f, 0xbf, 0x15, 0xe1, 0x49, 0xd2, 0x93, 0xc6,
        0x92, 0x72, 0x9e, 0x61, 0xd1, 0x63, 0xfa, 0xee, 0xf4, 0x19, 0xd5, 0xad, 0x58, 0xa4, 0xbb, 0xa1,
        0xdc, 0xf2, 0x83, 0x37, 0x42, 0xe4, 0x7a, 0x32, 0x9c, 0xcc, 0xab, 0x4a, 0x8f, 0x6e, 0x04, 0x27,
        0x2e, 0xe7, 0xe2, 0x5a, 0x96, 0x16, 0x23, 0x2b, 0xc2, 0x65, 0x66, 0x0f, 0xbc, 0xa9, 0x47, 0x41,
        0x34, 0x48, 0xfc, 0xb7, 0x6a, 0x88, 0xa5, 0x53, 0x86, 0xf9, 0x5b, 0xdb, 0x38, 0x7b, 0xc3, 0x1e,
        0x22, 0x33, 0x24, 0x28, 0x36, 0xc7, 0xb2, 0x3b, 0x8e, 0x77, 0xba, 0xf5, 0x14, 0x9f, 0x08, 0x55,
        0x9b, 0x4c, 0xfe, 0x60, 0x5c, 0xda, 0x18, 0x46, 0xcd, 0x7d, 0x21, 0xb0, 0x3f, 0x1b, 0x89, 0xff,
        0xeb, 0x84, 0x69, 0x3a, 0x9d, 0xd7, 0xd3, 0x70, 0x67, 0x40, 0xb5, 0xde, 0x5d, 0x30, 0x91, 0xb1,
        0x78, 0x11, 0x01, 0xe5, 0x00, 0x68, 0x98, 0xa0, 0xc5, 0x02, 0xa6, 0x74, 0x2d, 0x0b, 0xa2, 0x76,
        0xb3, 0xbe, 0xce, 0xbd, 0xae, 0xe9, 0x8a, 0x31, 0x1c, 0xec, 0xf1, 0x99, 0x94, 0xaa, 0xf6, 0x26,
        0x2f, 0xef, 0xe8, 0x8c, 0x35, 0x03, 0xd4, 0x7f, 0xfb, 0x05, 0xc1, 0x5e, 0x90, 0x20, 0x3d, 0x82,
        0xf7, 0xea, 0x0a, 0x0d, 0x7e, 0xf8, 0x50, 0x1a, 0xc4, 0x07, 0x57, 0xb8, 0x3c, 0x62, 0xe3, 0xc8,
        0xac, 0x52, 0x64, 0x10, 0xd0, 0xd9, 0x13, 0x0c, 0x12, 0x29, 0x51, 0xb9, 0xcf, 0xd6, 0x73, 0x8d,
        0x81, 0x54, 0xc0, 0xed, 0x4e, 0x44, 0xa7, 0x2a, 0x85, 0x25, 0xe6, 0xca, 0x7c, 0x8b, 0x56, 0x80,
    ],
    [
        0xce, 0xbb, 0xeb, 0x92, 0xea, 0xcb, 0x13, 0xc1, 0xe9, 0x3a, 0xd6, 0xb2, 0xd2, 0x90, 0x17, 0xf8,
        0x42, 0x15, 0x56, 0xb4, 0x65, 0x1c, 0x88, 0x43, 0xc5, 0x5c, 0x36, 0xba, 0xf5, 0x57, 0x67, 0x8d,
        0x31, 0xf6, 0x64, 0x58, 0x9e, 0xf4, 0x22, 0xaa, 0x75, 0x0f, 0x02, 0xb1, 0xdf, 0x6d, 0x73, 0x4d,
        0x7c, 0x26, 0x2e, 0xf7, 0x08, 0x5d, 0x44, 0x3e, 0x9f, 0x14, 0xc8, 0xae, 0x54, 0x10, 0xd8, 0xbc,
        0x1a, 0x6b, 0x69, 0xf3, 0xbd, 0x33, 0xab, 0xfa, 0xd1, 0x9b, 0x68, 0x4e, 0x16, 0x95, 0x91, 0xee,
        0x4c, 0x63, 0x8e, 0x5b, 0xcc, 0x3c, 0x19, 0xa1, 0x81, 0x49, 0x7b, 0xd9, 0x6f, 0x37, 0x60, 0xca,
        0xe7, 0x2b, 0x48, 0xfd, 0x96, 0x45, 0xfc, 0x41, 0x12, 0x0d, 0x79, 0xe5, 0x89, 0x8c, 0xe3, 0x20,
        0x30, 0xdc, 0xb7, 0x6c, 0x4a, 0xb5, 0x3f, 0x97, 0xd4, 0x62, 0x2d, 0x06, 0xa4, 0xa5, 0x83, 0x5f,
        0x2a, 0xda, 0xc9, 0x00, 0x7e, 0xa2, 0x55, 0xbf, 0x11, 0xd5, 0x9c, 0xcf, 0x0e, 0x0a, 0x3d, 0x51,
        0x7d, 0x93, 0x1b, 0xfe, 0xc4, 0x47, 0x09, 0x86, 0x0b, 0x8f, 0x9d, 0x6a, 0x07, 0xb9, 0xb0, 0x98,
        0x18, 0x32, 0x71, 0x4b, 0xef, 0x3b, 0x70, 0xa0, 0xe4, 0x40, 0xff, 0xc3, 0xa9, 0xe6, 0x78, 0xf9,
        0x8b, 0x46, 0x80, 0x1e, 0x38, 0xe1, 0xb8, 0xa8, 0xe0, 0x0c, 0x23, 0x76, 0x1d, 0x25, 0x24, 0x05,
        0xf1, 0x6e, 0x94, 0x28, 0x9a, 0x84, 0xe8, 0xa3, 0x4f, 0x77, 0xd3, 0x85, 0xe2, 0x52, 0xf2, 0x82,
        0x50, 0x7a, 0x2f, 0x74, 0x53, 0xb3, 0x61, 0xaf, 0x39, 0x35, 0xde, 0xcd, 0x1f, 0x99, 0xac, 0xad,
        0x72, 0x2c, 0xdd, 0xd0, 0x87, 0xbe, 0x5e, 0xa6, 0xec, 0x04, 0xc6, 0x03, 0x34, 0xfb, 0xdb, 0x59,
        0xb6, 0xc2, 0x01, 0xf0, 0x5a, 0xed, 0xa7, 0x66, 0x21, 0x7f, 0x8a, 0x27, 0xc7, 0xc0, 0x29, 0xd7,
    ],
    [
        0x93, 0xd9, 0x9a, 0xb5, 0x98, 0x22, 0x45, 0xfc, 0xba, 0x6a, 0xdf, 0x02, 0x9f, 0xdc, 0x51, 0x59,
        0x4a, 0x17, 0x2b, 0xc2, 0x94, 0xf4, 0xbb, 0xa3, 0x62, 0xe4, 0x71, 0xd4, 0xcd, 0x70, 0x16, 0xe1,
        0x49, 0x3c, 0xc0, 0xd8, 0x5c, 0x9b, 0xad, 0x85, 0x53, 0xa1, 0x7a, 0xc8, 0x2d, 0xe0, 0xd1, 0x72,
        0xa6, 0x2c, 0xc4, 0xe3, 0x76, 0x78, 0xb7, 0xb4, 0x09, 0x3b, 0x0e, 0x41, 0x4c, 0xde, 0xb2, 0x90,
        0x25, 0xa5, 0xd7, 0x03, 0x11, 0x00, 0xc3, 0x2e, 0x92, 0xef, 0x4e, 0x12, 0x9d, 0x7d, 0xcb, 0x35,
        0x10, 0xd5, 0x4f, 0x9e, 0x4d, 0xa9, 0x55, 0xc6, 0xd0, 0x7b, 0x18, 0x97, 0xd3, 0x36, 0xe6, 0x48,
        0x56, 0x81, 0x8f, 0x77, 0xcc, 0x9c, 0xb9, 0xe2, 0xac, 0xb8, 0x2f, 0x15, 0xa4, 0x7c, 0xda, 0x38,
        0x1e, 0x0b, 0x05, 0xd6, 0x14, 0x6e, 0x6c, 0x7e, 0x66, 0xfd, 0xb1, 0xe5, 0x60, 0xaf, 0x5e, 0x33,
        0x87, 0xc9, 0xf0, 0x5d, 0x6d, 0x3f, 0x88, 0x8d, 0xc7, 0xf7, 0x1d, 0xe9, 0xec, 0xed, 0x80, 0x29,
        0x27, 0xcf, 0x99, 0xa8, 0x50, 0x0f, 0x37, 0x24, 0x28, 0x30, 0x95, 0xd2, 0x3e, 0x5b, 0x40, 0x83,
        0xb3, 0x69, 0x57, 0x1f, 0x07, 0x1c, 0x8a, 0xbc, 0x20, 0xeb, 0xce, 0x8e, 0xab, 0xee, 0x31, 0xa2,
        0x73, 0xf9, 0xca, 0x3a, 0x1a, 0xfb, 0x0d, 0xc1, 0xfe, 0xfa, 0xf2, 0x6f, 0xbd, 0x96, 0xdd, 0x43,
        0x52, 0xb6, 0x08, 0xf3, 0xae, 0xbe, 0x19, 0x89, 0x32, 0x26, 0xb0, 0xea, 0x4b, 0x64, 0x84, 0x82,
        0x6b, 0xf5, 0x79, 0xbf, 0x01, 0x5f, 0x75, 0x63, 0x1b, 0x23, 0x3d, 0x68, 0x2a, 0x65, 0xe8, 0x91,
        0xf6, 0xff, 0x13, 0x58, 0xf1, 0x47, 0x0a, 0x7f, 0xc5, 0xa7, 0xe7, 0x61, 0x5a, 0x06, 0x46, 0x44,
        0x42, 0x04, 0xa0, 0xdb, 0x39, 0x86, 0x54, 0xaa, 0x8c, 0x34, 0x21, 0x8b, 0xf8, 0x0c, 0x74, 0x67,
    ],
    [
        0x68, 0x8d, 0xca, 0x4d, 0x73, 0x4b, 0x4e, 0x2a, 0xd4, 0x52, 0x26, 0xb3, 0x54, 0x1e, 0x19, 0x1f,
        0x22, 0x03, 0x46, 0x3d, 0x2d, 0x4a, 0x53, 0x83, 0x13, 0x8a, 0xb7, 0xd5, 0x25, 0x79, 0xf5, 0xbd,
        0x58, 0x2f, 0x0d, 0x02, 0xed, 0x51, 0x9e, 0x11, 0xf2, 0x3e, 0x55, 0x5e, 0xd1, 0x16, 0x3c, 0x66,
        0x70, 0x5d, 0xf3, 0x45, 0x40, 0xcc, 0xe8, 0x94, 0x56, 0x08, 0xce, 0x1a, 0x3a, 0xd2, 0xe1, 0xdf,
        0xb5, 0x38, 0x6e, 0x0e, 0xe5, 0xf4, 0xf9, 0x86, 0xe9, 0x4f, 0xd6, 0x85, 0x23, 0xcf, 0x32, 0x99,
        0x31, 0x14, 0xae, 0xee, 0xc8, 0x48, 0xd3, 0x30, 0xa1, 0x92, 0x41, 0xb1, 0x18, 0xc4, 0x2c, 0x71,
        0x72, 0x44, 0x15, 0xfd, 0x37, 0xbe, 0x5f, 0xaa, 0x9b, 0x88, 0xd8, 0xab, 0x89, 0x9c, 0xfa, 0x60,
        0xea, 0xbc, 0x62, 0x0c, 0x24, 0xa6, 0xa8, 0xec, 0x67, 0x20, 0xdb, 0x7c, 0x28, 0xdd, 0xac, 0x5b,
        0x34, 0x7e, 0x10, 0xf1, 0x7b, 0x8f, 0x63, 0xa0, 0x05, 0x9a, 0x43, 0x77, 0x21, 0xbf, 0x27, 0x09,
        0xc3, 0x9f, 0xb6, 0xd7, 0x29, 0xc2, 0xeb, 0xc0, 0xa4, 0x8b, 0x8c, 0x1d, 0xfb, 0xff, 0xc1, 0xb2,
        0x97, 0x2e, 0xf8, 0x65, 0xf6, 0x75, 0x07, 0x04, 0x49, 0x33, 0xe4, 0xd9, 0xb9, 0xd0, 0x42, 0xc7,
        0x6c, 0x90, 0x00, 0x8e, 0x6f, 0x50, 0x01, 0xc5, 0xda, 0x47, 0x3f, 0xcd, 0x69, 0xa2, 0xe2, 0x7a,
        0xa7, 0xc6, 0x93, 0x0f, 0x0a, 0x06, 0xe6, 0x2b, 0x96, 0xa3, 0x1c, 0xaf, 0x6a, 0x12, 0x84, 0x39,
        0xe7, 0xb0, 0x82, 0xf7, 0xfe, 0x9d, 0x87, 0x5c, 0x81, 0x35, 0xde, 0xb4, 0xa5, 0xfc, 0x80, 0xef,
        0xcb, 0xbb, 0x6b, 0x76, 0xba, 0x5a, 0x7d, 0x78, 0x0b, 0x95, 0xe3, 0xad, 0x74, 0x98, 0x3b, 0x36,
        0x64, 0x6d, 0xdc, 0xf0, 0x59, 0xa9, 0x4c, 0x17, 0x7f, 0x91, 0xb8, 0xc9, 0x57, 0x1b, 0xe0, 0x61,
    ],
];

/// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1
fn gf_mul(mut x: u8, mut y: u8) -> u8 {
    let mut r = 0u8;
    while y != 0 {
        if y & 1 == 1 {
            r ^= x;
        }
        let carry = x & 0x80;
        x <<= 1;
        if carry != 0 {
            x ^= 0x1d;
        }
        y >>= 1;
    }
    r
}

fn bytes_to_state(block: &[u8; BLOCK_BYTES]) -> State {
    let mut state = [[0u8; ROWS]; COLS];
    for (col, chunk) in block.chunks_exact(ROWS).enumerate() {
        state[col].copy_from_slice(chunk);
    }
    state
}

fn state_to_bytes(state: &State) -> [u8; BLOCK_BYTES] {
    let mut out = [0u8; BLOCK_BYTES];
    for (col, chunk) in out.chunks_exact_mut(ROWS).enumerate() {
        chunk.copy_from_slice(&state[col]);
    }
    out
}

fn xor_states(a: &State, b: &State) -> State {
    let mut out = [[0u8; ROWS]; COLS];
    for col in 0..COLS {
        for row in 0..ROWS {
            out[col][row] = a[col][row] ^ b[col][row];
        }
    }
    out
}

fn sub_bytes(state: &mut State) {
    for col in state.iter_mut() {
        for (row, byte) in col.iter_mut().enumerate() {
            *byte = SBOXES[row % 4][*byte as usize];
        }
    }
}

fn shift_bytes(state: &mut State) {
    let mut out = [[0u8; ROWS]; COLS];
    for (col, column) in state.iter().enumerate() {
        for (row, &byte) in column.iter().enumerate() {
            out[(col + row) % COLS][row] = byte;
        }
    }
    *state = out;
}

fn mix_columns(state: &mut State) {
    for col in state.iter_mut() {
        let mut out = [0u8; ROWS];
        for (row, acc) in out.iter_mut().enumerate() {
            for (k, &byte) in col.iter().enumerate() {
                *acc ^= gf_mul(MDS_VECTOR[(k + ROWS - row) % ROWS], byte);
            }
        }
        *col = out;
    }
}

/// T⊕: XOR round constants into row 0
fn permutation_xor(state: &mut State) {
    for round in 0..ROUNDS {
        for (col, column) in state.iter_mut().enumerate() {
            column[0] ^= ((col as u8) << 4) ^ round;
        }
        sub_bytes(state);
        shift_bytes(state);
        mix_columns(state);
    }
}

/// T+: add round constants to whole columns modulo 2^64
fn permutation_add(state: &mut State) {
    for round in 0..ROUNDS {
        for (col, column) in state.iter_mut().enumerate() {
            let constant = 0x00F0F0F0F0F0F0F3u64
                | ((((COLS - 1 - col) as u64 * 0x10) ^ round as u64) << 56);
            let word = u64::from_le_bytes(*column).wrapping_add(constant);
            *column = word.to_le_bytes();
        }
        sub_bytes(state);
        shift_bytes(state);
        mix_columns(state);
    }
}

/// Streaming Kupyna-256 hasher
pub struct Kupyna256 {
    state: State,
    buffer: [u8; BLOCK_BYTES],
    buffered: usize,
    total_bits: u128,
}

impl Kupyna256 {
    /// Create a new streaming hasher
    pub fn new() -> Self {
        let mut state = [[0u8; ROWS]; COLS];
        // Initialization vector: the block size in bytes, placed in the
        // first state byte
        state[0][0] = BLOCK_BYTES as u8;
        Self {
            state,
            buffer: [0u8; BLOCK_BYTES],
            buffered: 0,
            total_bits: 0,
        }
    }

    /// Absorb more data
    pub fn update(&mut self, mut data: &[u8]) {
        self.total_bits += (data.len() as u128) * 8;

        if self.buffered > 0 {
            let take = (BLOCK_BYTES - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered == BLOCK_BYTES {
                let block = self.buffer;
                self.compress(&block);
                self.buffered = 0;
            }
        }

        while data.len() >= BLOCK_BYTES {
            let mut block = [0u8; BLOCK_BYTES];
            block.copy_from_slice(&data[..BLOCK_BYTES]);
            self.compress(&block);
            data = &data[BLOCK_BYTES..];
        }

        if !data.is_empty() {
            self.buffer[..data.len()].copy_from_slice(data);
            self.buffered = data.len();
        }
    }

    /// Apply padding and the output transform, returning the digest
    pub fn finalize(mut self) -> [u8; DIGEST_BYTES] {
        let mut block = [0u8; BLOCK_BYTES];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = 0x80;

        if self.buffered + 1 > BLOCK_BYTES - LENGTH_BYTES {
            let full = block;
            self.compress(&full);
            block = [0u8; BLOCK_BYTES];
        }

        // 96-bit little-endian message length in bits
        let length = self.total_bits.to_le_bytes();
        block[BLOCK_BYTES - LENGTH_BYTES..].copy_from_slice(&length[..LENGTH_BYTES]);
        let last = block;
        self.compress(&last);

        // Output transform: h ← T⊕(h) ⊕ h, truncated to the trailing bytes
        let mut transformed = self.state;
        permutation_xor(&mut transformed);
        let final_state = xor_states(&transformed, &self.state);

        let bytes = state_to_bytes(&final_state);
        let mut digest = [0u8; DIGEST_BYTES];
        digest.copy_from_slice(&bytes[BLOCK_BYTES - DIGEST_BYTES..]);
        digest
    }

    fn compress(&mut self, block: &[u8; BLOCK_BYTES]) {
        let message = bytes_to_state(block);

        let mut keyed = xor_states(&self.state, &message);
        permutation_xor(&mut keyed);

        let mut plain = message;
        permutation_add(&mut plain);

        self.state = xor_states(&xor_states(&keyed, &plain), &self.state);
    }
}

impl Default for Kupyna256 {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data using Kupyna-256
///
/// # Arguments
///
/// * `data` - The data to hash
///
/// # Returns
///
/// 32-byte Kupyna-256 hash
pub fn kupyna_256(data: &[u8]) -> [u8; DIGEST_BYTES] {
    let mut hasher = Kupyna256::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sboxes_are_permutations() {
        for (i, sbox) in SBOXES.iter().enumerate() {
            let mut seen = [false; 256];
            for &b in sbox.iter() {
                assert!(!seen[b as usize], "S-box {i} repeats value {b:#04x}");
                seen[b as usize] = true;
            }
        }
    }

    #[test]
    fn test_known_answer_empty_message() {
        assert_eq!(
            hex::encode(kupyna_256(b"")),
            "cd5101d1ccdf0d1d1f4ada56e888cd724ca1a0838a3521e7131d4fb78d0f5eb6"
        );
    }

    #[test]
    fn test_known_answer_512_bit_message() {
        let msg: Vec<u8> = (0u8..64).collect();
        assert_eq!(
            hex::encode(kupyna_256(&msg)),
            "08f4ee6f1be6903b324c4e27990cb24ef69dd58dbe84813ee0a52f6631239875"
        );
    }

    #[test]
    fn test_determinism_and_distinctness() {
        let a = kupyna_256(b"hello world");
        let b = kupyna_256(b"hello world");
        assert_eq!(a, b);
        assert_ne!(kupyna_256(b"hello world"), kupyna_256(b"hello world!"));
        assert_ne!(kupyna_256(b""), kupyna_256(b"\0"));
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let data: Vec<u8> = (0u8..=255).cycle().take(1000).collect();
        for split in [0, 1, 52, 63, 64, 65, 500, 999, 1000] {
            let mut hasher = Kupyna256::new();
            hasher.update(&data[..split]);
            hasher.update(&data[split..]);
            assert_eq!(hasher.finalize(), kupyna_256(&data), "split at {split}");
        }
    }

    #[test]
    fn test_padding_boundaries() {
        // Lengths around the block and length-field boundaries must all
        // produce distinct digests without panicking
        let mut digests = Vec::new();
        for len in [0usize, 1, 51, 52, 53, 63, 64, 65, 127, 128, 129] {
            let data = vec![0x5Au8; len];
            digests.push(kupyna_256(&data));
        }
        for i in 0..digests.len() {
            for j in i + 1..digests.len() {
                assert_ne!(digests[i], digests[j]);
            }
        }
    }

    #[test]
    fn test_gf_mul_small_cases() {
        assert_eq!(gf_mul(1, 0x57), 0x57);
        assert_eq!(gf_mul(0, 0xFF), 0);
        // x * x^7 folds through the reduction polynomial: x^8 = x^4+x^3+x^2+1
        assert_eq!(gf_mul(0x80, 0x02), 0x1d);
    }
}
