pub mod pcdeals;
