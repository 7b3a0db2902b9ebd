/// Initial bitset size, in 32-bit words.
const INITIAL_WORDS: usize = 4;

/// Allocates and reclaims small positive integer ids with a first-fit
/// policy.
///
/// Availability is a growable bitset, one bit per id, set bits free. Ids
/// start at 1 and are issued lowest-first; the id space doubles when
/// exhausted and never shrinks.
#[derive(Debug, Clone)]
pub struct IdAllocator {
	words: Vec<u32>,
	/// Ids currently handed out and not yet released.
	live: u32,
}

impl Default for IdAllocator {
	fn default() -> Self {
		Self::new()
	}
}

impl IdAllocator {
	/// Creates an allocator with every id free.
	pub fn new() -> Self {
		Self {
			words: vec![u32::MAX; INITIAL_WORDS],
			live: 0,
		}
	}

	/// Returns the lowest free id, marking it taken.
	pub fn allocate(&mut self) -> u32 {
		self.live += 1;

		for (i, word) in self.words.iter_mut().enumerate() {
			if *word != 0 {
				let bit = word.trailing_zeros();
				*word &= !(1 << bit);
				return 32 * i as u32 + bit + 1;
			}
		}

		// Every bit is taken: double the bitset and hand out the first
		// id of the new region.
		let n = self.words.len();
		self.words.resize(n * 2, u32::MAX);
		self.words[n] = u32::MAX - 1;
		32 * n as u32 + 1
	}

	/// Marks `id` free again.
	///
	/// Ids past the end of the bitset are ignored: loaded documents can
	/// carry huge explicit numeric suffixes, and releasing those must not
	/// grow the bitset. Releasing an in-range id that is already free is
	/// likewise a no-op, since names registered out of band never marked
	/// their suffix taken in the first place.
	pub fn release(&mut self, id: u32) {
		debug_assert!(id > 0, "id 0 is never issued");
		if id == 0 {
			return;
		}

		let idx = ((id - 1) / 32) as usize;
		let bit = (id - 1) % 32;
		if let Some(word) = self.words.get_mut(idx) {
			if *word & (1 << bit) == 0 {
				*word |= 1 << bit;
				self.live -= 1;
			}
		}
	}

	/// Number of ids currently taken.
	pub fn live(&self) -> u32 {
		self.live
	}
}
