/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
/// Transport boundary and the default reqwest transport
pub mod http;
/// Request descriptors and request shaping
pub mod requests;
pub mod utils;
