//! RIFF chunk primitives shared by the writer and the reader.
//!
//! a chunk is `<fourcc id> <u32 little-endian size> <payload>`, followed by one zero
//! byte if the payload length is odd. the pad byte is never counted in the size.
//! `RIFF` and `LIST` chunks start their payload with another fourcc (the form/list type).

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(u8, u8, u8, u8);

impl std::fmt::Debug for FourCC {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		write!(f, "FourCC({})", self)
	}
}

impl std::fmt::Display for FourCC {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		// every byte is checked to be printable ascii on construction
		for b in self.bytes() {
			write!(f, "{}", b as char)?;
		}
		Ok(())
	}
}

impl FourCC {
	/// `None` unless all four bytes are printable ASCII.
	pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Option<Self> {
		if !is_id_byte(a) || !is_id_byte(b) || !is_id_byte(c) || !is_id_byte(d) {
			return None;
		}
		Some(FourCC(a, b, c, d))
	}

	pub const fn bytes(self) -> [u8; 4] {
		[self.0, self.1, self.2, self.3]
	}
}

const fn is_id_byte(b: u8) -> bool {
	// spaces are allowed (e.g. "DLS "), control characters are not
	b >= 0x20 && b < 0x7f
}

/// compile-time fourcc. panics (at compile time, in a const context) on a bad id.
pub const fn fourcc(s: &str) -> FourCC {
	let bytes = s.as_bytes();
	if bytes.len() != 4 {
		panic!("fourcc must be 4 bytes");
	}
	match FourCC::new(bytes[0], bytes[1], bytes[2], bytes[3]) {
		Some(x) => x,
		None => panic!("bad fourcc"),
	}
}

pub const RIFF: FourCC = fourcc("RIFF");
pub const LIST: FourCC = fourcc("LIST");
pub const SFBK: FourCC = fourcc("sfbk");
pub const INFO: FourCC = fourcc("INFO");
pub const SDTA: FourCC = fourcc("sdta");
pub const PDTA: FourCC = fourcc("pdta");

pub const IFIL: FourCC = fourcc("ifil");
pub const ISNG: FourCC = fourcc("isng");
pub const INAM: FourCC = fourcc("INAM");
pub const ICRD: FourCC = fourcc("ICRD");
pub const IENG: FourCC = fourcc("IENG");
pub const ICOP: FourCC = fourcc("ICOP");
pub const ICMT: FourCC = fourcc("ICMT");
pub const ISFT: FourCC = fourcc("ISFT");

pub const SMPL: FourCC = fourcc("smpl");

pub const PHDR: FourCC = fourcc("phdr");
pub const PBAG: FourCC = fourcc("pbag");
pub const PMOD: FourCC = fourcc("pmod");
pub const PGEN: FourCC = fourcc("pgen");
pub const INST: FourCC = fourcc("inst");
pub const IBAG: FourCC = fourcc("ibag");
pub const IMOD: FourCC = fourcc("imod");
pub const IGEN: FourCC = fourcc("igen");
pub const SHDR: FourCC = fourcc("shdr");

/// size of a chunk header (id + size).
pub const HEADER_LEN: usize = 8;

/// total number of bytes a chunk with this payload length occupies, pad byte included.
pub const fn padded_len(payload_len: usize) -> usize {
	HEADER_LEN + payload_len + (payload_len & 1)
}

/// append a chunk. the declared size is `payload.len()`; a pad byte follows odd payloads.
pub fn write_chunk(out: &mut Vec<u8>, id: FourCC, payload: &[u8]) {
	out.reserve(padded_len(payload.len()));
	out.extend_from_slice(&id.bytes());
	out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
	out.extend_from_slice(payload);
	if payload.len() % 2 != 0 {
		out.push(0);
	}
}

/// append a `RIFF` or `LIST` chunk: the declared size covers the type tag and the payload.
pub fn write_list(out: &mut Vec<u8>, id: FourCC, kind: FourCC, payload: &[u8]) {
	let size = 4 + payload.len();
	out.reserve(padded_len(size));
	out.extend_from_slice(&id.bytes());
	out.extend_from_slice(&(size as u32).to_le_bytes());
	out.extend_from_slice(&kind.bytes());
	out.extend_from_slice(payload);
	if size % 2 != 0 {
		out.push(0);
	}
}
