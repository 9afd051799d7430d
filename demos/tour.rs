//! A walk through the `Fp32` API.
//!
//! Run with `RUST_LOG=fp32=trace` to see what happens inside each operation.

extern crate env_logger;
extern crate fp32;

use fp32::Fp32;

fn main() {
    env_logger::init();

    println!("--- Construction ---");
    let pi = Fp32::from(3.14159f32);
    println!("Fp32 for pi ~ 3.14159");
    print!("{}", pi.details());

    println!("\n--- Arithmetic ---");
    let (a, b) = (Fp32::from(2.5f32), Fp32::from(1.5f32));
    println!("a = {}", a);
    println!("b = {}", b);
    println!("a + b = {}", a + b);
    println!("a - b = {}", a - b);
    println!("a * b = {}", a * b);
    println!("a / b = {}", a / b);
    let quotient = a.div_checked(b);
    println!("a / b raises {:?}", quotient.exceptions());

    println!("\n--- Special values ---");
    let inf = Fp32::infinity(false);
    let nan = Fp32::nan();
    let zero = Fp32::zero(false);
    println!("Positive infinity: {} (hex: {})", inf, inf.to_hex());
    println!("NaN: {} (hex: {})", nan, nan.to_hex());
    println!("Zero: {} (hex: {})", zero, zero.to_hex());

    println!("\n--- Edge cases ---");
    let one = Fp32::from(1.0f32);
    let result = one / zero;
    println!("1.0 / 0.0 = {} (is_infinite: {})", result, result.is_infinite());
    let result = zero / zero;
    println!("0.0 / 0.0 = {} (is_nan: {})", result, result.is_nan());
    println!("NaN == NaN: {}", nan == nan);
    println!("NaN unordered with 1.0: {}", nan.is_unordered(one));
    println!("sqrt(-1.0) = {}", (-one).sqrt());

    println!("\n--- Bit patterns ---");
    for &(name, value) in &[("1.0", 1.0f32), ("2.0", 2.0), ("0.5", 0.5), ("-1.0", -1.0)] {
        let value = Fp32::from(value);
        println!("{:<6} : {} : {}", name, value.to_binary(), value.to_hex());
    }

    println!("\n--- Precision limits ---");
    let large = Fp32::from(16777216.0f32);
    let small = Fp32::from(1.0f32);
    println!("Large number: {}", large);
    println!("Small number: {}", small);
    println!("Large + Small = {}", large + small);
    println!("0.1 is stored as {}", Fp32::from(0.1f32).to_exact_decimal());

    println!("\n--- Subnormal numbers ---");
    let tiny = Fp32::from_bits(0x0000_0001);
    let small_normal = Fp32::MIN_POSITIVE;
    println!("Smallest subnormal number:");
    println!("  Value: {}", tiny);
    println!("  Binary: {}", tiny.to_binary());
    println!("  Is subnormal: {}", tiny.is_subnormal());
    println!("Smallest normal number:");
    println!("  Value: {}", small_normal);
    println!("  Binary: {}", small_normal.to_binary());
    println!("  Is normal: {}", small_normal.is_normal());
    println!("  Halved: {}", small_normal / Fp32::from(2.0f32));
}
