/// A single rule applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0+a = a`
    AddZero,

    /// `a+a = 2a`, `2a+3a = 5a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*3 = 6`
    FoldNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0`, for positive `a`
    ZeroPower,

    /// `(a^b)^c = a^(b*c)`
    PowerOfPower,

    /// `4^(3/2) = 8`, `8^(1/2) = 2*2^(1/2)`
    RationalPower,

    /// `(a*b)^c = a^c*b^c`
    DistributePower,

    /// `2*(a+b) = 2a+2b`
    DistributeCoefficient,

    /// `e^log(a) = a`
    ExpLog,

    /// `log(1) = 0`, `log(e) = 1`, `log(e^a) = a`
    Log,

    /// `sin(-a) = -sin(a)`, `cos(-a) = cos(a)`
    OddEven,

    /// `sin(pi/6) = 1/2`
    Sin,

    /// `cos(pi/3) = 1/2`
    Cos,

    /// `tan(pi/4) = 1`
    Tan,
}
