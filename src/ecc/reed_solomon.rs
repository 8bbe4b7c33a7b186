/// Reed-Solomon error correction for QR codes
/// Codewords are polynomial coefficients over GF(256), highest degree first.
/// The generator has roots alpha^0 .. alpha^(ecc-1).
use super::gf256::Gf256;

/// Reed-Solomon encoder for a fixed number of EC codewords
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder {
    // Generator coefficients without the leading 1, highest degree first
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Precompute the generator polynomial prod(x - alpha^i), i in 0..num_ecc_codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        assert!(
            (1..=255).contains(&num_ecc_codewords),
            "EC length must be 1..=255"
        );
        let n = num_ecc_codewords;
        let mut generator = vec![0u8; n];
        generator[n - 1] = 1;

        let mut root = 1u8;
        for _ in 0..n {
            // Multiply by (x - root)
            for j in 0..n {
                generator[j] = Gf256::mul(generator[j], root);
                if j + 1 < n {
                    generator[j] ^= generator[j + 1];
                }
            }
            root = Gf256::mul(root, 2);
        }

        Self { generator }
    }

    /// Number of EC codewords produced per block
    pub fn ecc_len(&self) -> usize {
        self.generator.len()
    }

    /// Remainder of data * x^ecc divided by the generator
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let n = self.generator.len();
        let mut remainder = vec![0u8; n];
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[n - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(&self.generator) {
                *r ^= Gf256::mul(g, factor);
            }
        }
        remainder
    }
}

/// Reed-Solomon decoder for QR codes
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` (data followed by EC codewords) in place.
    ///
    /// Returns the number of corrected codewords. More than `ecc / 2` errors
    /// usually fail; occasionally they land on another valid codeword and the
    /// wrong data is returned as a success.
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        let n = received.len();
        if n > 255 || n <= self.num_ecc_codewords {
            return Err("Invalid block length");
        }

        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        // Find error locator polynomial using Berlekamp-Massey
        let sigma = self.find_error_locator(&syndrome)?;

        // Find error positions (Chien search)
        let error_positions = Self::find_error_positions(&sigma, n)?;

        // Find error values (Forney algorithm)
        let error_values = Self::find_error_values(&sigma, &syndrome, &error_positions, n)?;

        for (&pos, &value) in error_positions.iter().zip(&error_values) {
            received[pos] ^= value;
        }

        // Verify syndrome is now zero
        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err("Uncorrectable error");
        }

        Ok(error_positions.len())
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|i| Gf256::eval_poly(received, Gf256::exp(i)))
            .collect()
    }

    /// Berlekamp-Massey; returns sigma with ascending coefficients, sigma[0] = 1
    fn find_error_locator(&self, syndrome: &[u8]) -> Result<Vec<u8>, &'static str> {
        let mut sigma = vec![1u8];
        let mut prev = vec![1u8];
        let mut prev_delta = 1u8;
        let mut l = 0usize;
        let mut m = 1usize;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(sigma.len() - 1) {
                delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            // next = sigma - (delta / prev_delta) * x^m * prev
            let coef = Gf256::div(delta, prev_delta);
            let mut next = sigma.clone();
            if next.len() < prev.len() + m {
                next.resize(prev.len() + m, 0);
            }
            for (j, &p) in prev.iter().enumerate() {
                next[j + m] ^= Gf256::mul(coef, p);
            }

            if 2 * l <= i {
                prev = std::mem::replace(&mut sigma, next);
                prev_delta = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                sigma = next;
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma[sigma.len() - 1] == 0 {
            sigma.pop();
        }

        let degree = sigma.len() - 1;
        if degree != l || l > self.num_ecc_codewords / 2 {
            return Err("Too many errors");
        }
        Ok(sigma)
    }

    fn find_error_positions(sigma: &[u8], n: usize) -> Result<Vec<usize>, &'static str> {
        // sigma(x) = prod(1 - X_k * x) with X_k = alpha^(n-1-pos),
        // so roots sit at X_k^{-1}.
        let positions: Vec<usize> = (0..n)
            .filter(|&pos| eval_ascending(sigma, locator_inverse(pos, n)) == 0)
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err("Wrong number of error positions found");
        }
        Ok(positions)
    }

    fn find_error_values(
        sigma: &[u8],
        syndrome: &[u8],
        error_positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, &'static str> {
        // omega = syndrome * sigma mod x^(2t)
        let mut omega = vec![0u8; syndrome.len()];
        for (i, o) in omega.iter_mut().enumerate() {
            for j in 0..=i.min(sigma.len() - 1) {
                *o ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }
        }

        let mut values = Vec::with_capacity(error_positions.len());
        for &pos in error_positions {
            let x_inv = locator_inverse(pos, n);
            let omega_val = eval_ascending(&omega, x_inv);

            // Formal derivative: only odd powers survive in characteristic 2
            let mut sigma_prime_val = 0u8;
            for i in (1..sigma.len()).step_by(2) {
                sigma_prime_val ^= Gf256::mul(sigma[i], Gf256::pow(x_inv, i - 1));
            }
            if sigma_prime_val == 0 {
                return Err("Sigma derivative is zero");
            }

            // Forney: e_k = X_k * omega(X_k^{-1}) / sigma'(X_k^{-1})
            let x_k = Gf256::exp(n - 1 - pos);
            values.push(Gf256::mul(x_k, Gf256::div(omega_val, sigma_prime_val)));
        }

        Ok(values)
    }
}

/// alpha^-(n-1-pos), the root of sigma that flags position `pos`
fn locator_inverse(pos: usize, n: usize) -> u8 {
    Gf256::exp(255 - (n - 1 - pos) % 255)
}

fn eval_ascending(coefficients: &[u8], x: u8) -> u8 {
    coefficients
        .iter()
        .rev()
        .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
}
