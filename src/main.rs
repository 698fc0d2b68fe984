use clockmark::math;

fn main() {
    let result = clockmark::step("00:01:00", -1);
    println!("{result:?}");

    let guarded = math::escape("Solve $a_1 x^2 + b_1 x + c_1 = 0$ for $x$.");
    println!("{guarded}");
}
