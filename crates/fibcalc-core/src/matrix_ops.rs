//! Matrix multiplication operations including Strassen.

use num_bigint::{BigInt, BigUint, Sign};

use crate::matrix_types::Matrix;

/// Multiply two 2x2 matrices exploiting Fibonacci symmetry (b == c).
///
/// All powers of the Fibonacci Q matrix `[[1,1],[1,0]]` are symmetric
/// (i.e., `b == c`), so we use `multiply_symmetric` which requires
/// 5 multiplications instead of the standard 8.
#[must_use]
pub fn matrix_multiply(a: &Matrix, b: &Matrix) -> Matrix {
    a.multiply_symmetric(b)
}

/// Square a 2x2 matrix exploiting Fibonacci symmetry (b == c).
///
/// Uses `square_symmetric` which requires 3 multiplications instead of 8.
#[must_use]
pub fn matrix_square(m: &Matrix) -> Matrix {
    m.square_symmetric()
}

fn to_signed(x: &BigUint) -> BigInt {
    BigInt::from_biguint(Sign::Plus, x.clone())
}

fn to_unsigned(x: BigInt) -> BigUint {
    x.to_biguint()
        .expect("product of non-negative matrices has non-negative entries")
}

/// Multiply two general 2x2 matrices using Strassen's 7-multiplication
/// decomposition, without relying on any symmetry of the operands.
///
/// `M1..M7` are the classic Strassen products; several of the intermediate
/// sums and differences can be negative even though the inputs and the
/// final result are not, so the decomposition runs over `BigInt` and
/// converts back to `BigUint` only once the four output entries are formed.
fn strassen_generic(a: &Matrix, b: &Matrix) -> Matrix {
    let (a11, a12, a21, a22) = (
        to_signed(&a.a),
        to_signed(&a.b),
        to_signed(&a.c),
        to_signed(&a.d),
    );
    let (b11, b12, b21, b22) = (
        to_signed(&b.a),
        to_signed(&b.b),
        to_signed(&b.c),
        to_signed(&b.d),
    );

    let m1 = (&a11 + &a22) * (&b11 + &b22);
    let m2 = (&a21 + &a22) * &b11;
    let m3 = &a11 * (&b12 - &b22);
    let m4 = &a22 * (&b21 - &b11);
    let m5 = (&a11 + &a12) * &b22;
    let m6 = (&a21 - &a11) * (&b11 + &b12);
    let m7 = (&a12 - &a22) * (&b21 + &b22);

    let c11 = &m1 + &m4 - &m5 + &m7;
    let c12 = &m3 + &m5;
    let c21 = &m2 + &m4;
    let c22 = &m1 - &m2 + &m3 + &m6;

    Matrix {
        a: to_unsigned(c11),
        b: to_unsigned(c12),
        c: to_unsigned(c21),
        d: to_unsigned(c22),
    }
}

/// Multiply two 2x2 matrices, switching from the symmetric Fibonacci-Q
/// optimization to Strassen's 7-multiplication decomposition once operand
/// width exceeds `threshold` bits.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn matrix_multiply_strassen(a: &Matrix, b: &Matrix, threshold: usize) -> Matrix {
    let max_bits = a.a.bits().max(b.a.bits()) as usize;

    if max_bits < threshold {
        return matrix_multiply(a, b);
    }

    strassen_generic(a, b)
}
