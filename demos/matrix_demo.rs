//! Small end-to-end tour: build containers, run the arithmetic, round-trip
//! through the textual format.

use std::io::Cursor;

use anyhow::Result;
use dynmat::{DynMatrix, DynVector};

fn main() -> Result<()> {
    env_logger::init();

    let a = DynMatrix::from_vec(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
    let b = a.transpose();

    println!("a =\n{}", a);
    println!("a^T =\n{}", b);
    println!("a + a^T =\n{}", a.try_add(&b)?);
    println!("a * a^T =\n{}", a.try_mul(&b)?);
    println!("2a =\n{}", &a * 2.0);

    let v = DynVector::from_slice(&[1.0, -1.0])?;
    println!("a * v = {}", a.mul_vector(&v)?);
    println!("v . v = {}", v.dot(&v)?);

    // The textual format carries no size prefix, so the reader is pre-sized.
    let mut parsed = DynMatrix::<f64>::new(2)?;
    parsed.read_from(&mut Cursor::new(format!("{}\n", a)))?;
    assert_eq!(parsed, a);
    println!("round-tripped:\n{}", parsed);

    Ok(())
}
