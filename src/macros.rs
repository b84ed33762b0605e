//===========================================================================//

macro_rules! decode_failure {
    ($e:expr) => {
        return Err($crate::error::Error::Decode(
            ::std::string::ToString::to_string(&$e),
        ))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::Decode(format!($fmt, $($arg)+)))
    };
}

macro_rules! encode_failure {
    ($e:expr) => {
        return Err($crate::error::Error::Encode(
            ::std::string::ToString::to_string(&$e),
        ))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::Encode(format!($fmt, $($arg)+)))
    };
}

macro_rules! malformed {
    ($e:expr) => {
        return Err($crate::error::Error::Malformed(
            ::std::string::ToString::to_string(&$e),
        ))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::Malformed(format!($fmt, $($arg)+)))
    };
}

//===========================================================================//
